//! Host state sampling
//!
//! Reads uptime, power-supply and GPU load pseudo-files into a typed
//! [`Sample`]. Missing inputs are normal and map to sentinel variants;
//! read failures stay attached to their field as a [`ReadError`].

pub(crate) mod gpu;
pub(crate) mod power;
pub(crate) mod uptime;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, TimeDelta};

use crate::consts::{DEFAULT_GPU_LOAD_FILE, DEFAULT_POWER_SUPPLY_DIR, DEFAULT_UPTIME_FILE};
use crate::error::ReadError;

pub(crate) use gpu::GpuLoad;
pub(crate) use power::{PowerStatus, SupplyReading};

/// Outcome of reading one field
pub(crate) type Reading<T> = Result<T, ReadError>;

/// Locations of the pseudo-files a sample is built from
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SysPaths {
    pub(crate) power_supply_dir: PathBuf,
    pub(crate) gpu_load_file: PathBuf,
    pub(crate) uptime_file: PathBuf,
}

impl Default for SysPaths {
    fn default() -> Self {
        SysPaths {
            power_supply_dir: PathBuf::from(DEFAULT_POWER_SUPPLY_DIR),
            gpu_load_file: PathBuf::from(DEFAULT_GPU_LOAD_FILE),
            uptime_file: PathBuf::from(DEFAULT_UPTIME_FILE),
        }
    }
}

/// One sampling cycle
#[derive(Debug)]
pub(crate) struct Sample {
    pub(crate) taken_at: DateTime<FixedOffset>,
    pub(crate) uptime: Reading<TimeDelta>,
    pub(crate) power: Reading<PowerStatus>,
    pub(crate) gpu: Reading<Option<GpuLoad>>,
}

pub(crate) struct Sampler {
    paths: SysPaths,
}

impl Sampler {
    pub(crate) fn new(paths: SysPaths) -> Self {
        Sampler { paths }
    }

    pub(crate) fn collect(&self, taken_at: DateTime<FixedOffset>) -> Sample {
        let sample = Sample {
            taken_at,
            uptime: uptime::read_uptime(&self.paths.uptime_file),
            power: power::read_power_status(&self.paths.power_supply_dir),
            gpu: gpu::read_gpu_load(&self.paths.gpu_load_file),
        };

        if let Err(e) = &sample.uptime {
            log::warn!("uptime unavailable: {e}");
        }
        if let Err(e) = &sample.power {
            log::warn!("power status unavailable: {e}");
        }
        if let Err(e) = &sample.gpu {
            log::warn!("GPU load unavailable: {e}");
        }

        sample
    }
}

/// Read a pseudo-file and strip surrounding whitespace
fn read_trimmed(path: &Path) -> Reading<String> {
    fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })
}
