//! Power-supply enumeration (`/sys/class/power_supply/*`)

use std::fs;
use std::path::Path;

use crate::error::ReadError;

use super::{Reading, read_trimmed};

const STATUS_FILE: &str = "status";
const VOLTAGE_FILE: &str = "voltage_now";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PowerStatus {
    /// No power-supply directory, or a directory without entries
    Unknown,
    Sources(Vec<SupplyReading>),
}

/// One battery/AC entry. Either file may be absent.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SupplyReading {
    pub(crate) name: String,
    pub(crate) status: Option<String>,
    pub(crate) voltage_uv: Option<i64>,
}

impl SupplyReading {
    pub(crate) fn voltage_volts(&self) -> Option<f64> {
        self.voltage_uv.map(|uv| uv as f64 / 1_000_000.0)
    }
}

/// Read every entry under `dir`, sorted by name.
///
/// The first failing read fails the whole status, matching how the log line
/// reports a single power error rather than a partial list.
pub(crate) fn read_power_status(dir: &Path) -> Reading<PowerStatus> {
    if !dir.exists() {
        log::debug!("power supply directory {} not present", dir.display());
        return Ok(PowerStatus::Unknown);
    }

    let io_err = |source: std::io::Error| ReadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    if names.is_empty() {
        return Ok(PowerStatus::Unknown);
    }
    names.sort();

    names
        .into_iter()
        .map(|name| read_supply(&dir.join(&name), name))
        .collect::<Result<Vec<_>, _>>()
        .map(PowerStatus::Sources)
}

fn read_supply(path: &Path, name: String) -> Reading<SupplyReading> {
    let status_path = path.join(STATUS_FILE);
    let status = if status_path.exists() {
        Some(read_trimmed(&status_path)?)
    } else {
        None
    };

    let voltage_path = path.join(VOLTAGE_FILE);
    let voltage_uv = if voltage_path.exists() {
        let raw = read_trimmed(&voltage_path)?;
        let uv = raw.parse::<i64>().map_err(|_| ReadError::Parse {
            path: voltage_path.clone(),
            value: raw,
        })?;
        Some(uv)
    } else {
        None
    };

    Ok(SupplyReading {
        name,
        status,
        voltage_uv,
    })
}
