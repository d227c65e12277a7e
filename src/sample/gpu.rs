//! Jetson GPU load (`/sys/devices/gpu.0/load`)

use std::path::Path;

use crate::error::ReadError;

use super::{Reading, read_trimmed};

/// GPU utilization as reported by the driver, in tenths of a percent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GpuLoad(i64);

impl GpuLoad {
    pub(crate) fn from_tenths(tenths: i64) -> Self {
        GpuLoad(tenths)
    }

    pub(crate) fn percent(self) -> f64 {
        self.0 as f64 / 10.0
    }
}

/// `Ok(None)` when the device exposes no load file (non-Jetson hosts).
pub(crate) fn read_gpu_load(path: &Path) -> Reading<Option<GpuLoad>> {
    if !path.exists() {
        log::debug!("GPU load file {} not present", path.display());
        return Ok(None);
    }
    let raw = read_trimmed(path)?;
    raw.parse::<i64>()
        .map(|tenths| Some(GpuLoad::from_tenths(tenths)))
        .map_err(|_| ReadError::Parse {
            path: path.to_path_buf(),
            value: raw,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_tenths_of_percent() {
        let dir = tempfile::tempdir().unwrap();
        let load = dir.path().join("load");
        fs::write(&load, "455\n").unwrap();

        let reading = read_gpu_load(&load).unwrap().unwrap();
        assert_eq!(reading, GpuLoad::from_tenths(455));
        assert_eq!(reading.percent(), 45.5);
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_gpu_load(&dir.path().join("load")).unwrap(), None);
    }

    #[test]
    fn garbage_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let load = dir.path().join("load");
        fs::write(&load, "busy").unwrap();

        assert!(matches!(
            read_gpu_load(&load),
            Err(ReadError::Parse { ref value, .. }) if value == "busy"
        ));
    }
}
