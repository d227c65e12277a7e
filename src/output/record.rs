//! Log file text blocks: title, session banner, sample line, footer.
//!
//! Downstream scrapers key on this exact text, so the layouts here are
//! fixed. Each function returns the block with its trailing newline(s).

use chrono::{DateTime, FixedOffset};

use crate::consts::SEPARATOR_WIDTH;
use crate::sample::Sample;

use super::format::{format_gpu, format_power, format_timedelta, format_timestamp, format_uptime};

fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

/// First line of a fresh log file
pub(crate) fn title(device: &str) -> String {
    format!("Power Monitor Log - {device}\n")
}

pub(crate) fn banner(started: &DateTime<FixedOffset>) -> String {
    let sep = separator();
    format!(
        "{sep}\nTEST STARTED\nStart Time: {}\n{sep}\n",
        format_timestamp(started)
    )
}

/// `TIMESTAMP | Uptime: .. | Power: .. | GPU Power: ..` without a newline
pub(crate) fn sample_line(sample: &Sample) -> String {
    format!(
        "{} | Uptime: {} | Power: {} | GPU Power: {}",
        format_timestamp(&sample.taken_at),
        format_uptime(&sample.uptime),
        format_power(&sample.power),
        format_gpu(&sample.gpu),
    )
}

pub(crate) fn footer(started: &DateTime<FixedOffset>, ended: &DateTime<FixedOffset>) -> String {
    let sep = separator();
    format!(
        "\n{sep}\nTEST COMPLETED\nStart Time: {}\nEnd Time: {}\nTotal Duration: {}\n{sep}\n\n",
        format_timestamp(started),
        format_timestamp(ended),
        format_timedelta(ended.signed_duration_since(started)),
    )
}
