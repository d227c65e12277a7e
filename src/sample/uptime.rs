//! Time since boot, from `/proc/uptime`

use std::path::Path;

use chrono::TimeDelta;

use crate::error::ReadError;

use super::{Reading, read_trimmed};

/// First field of `/proc/uptime`, truncated to whole seconds.
///
/// The kernel derives it from a monotonic boot clock, so successive readings
/// never go backwards even when the wall clock is adjusted.
pub(crate) fn read_uptime(path: &Path) -> Reading<TimeDelta> {
    let raw = read_trimmed(path)?;
    parse_uptime(&raw).ok_or_else(|| ReadError::Parse {
        path: path.to_path_buf(),
        value: raw,
    })
}

fn parse_uptime(raw: &str) -> Option<TimeDelta> {
    let secs = raw.split_whitespace().next()?.parse::<f64>().ok()?;
    if !secs.is_finite() || secs < 0.0 {
        return None;
    }
    TimeDelta::try_seconds(secs.trunc() as i64)
}
