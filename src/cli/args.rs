//! CLI argument definitions
//!
//! Command-line options, config file merging, and resolution into the
//! validated [`Settings`] the monitor runs with.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::app::Settings;
use crate::config::{Config, ConfigLogMode};
use crate::consts::{DEFAULT_DEVICE, DEFAULT_INTERVAL_SECS, DEFAULT_LOG_FILE};
use crate::error::AppError;
use crate::sample::SysPaths;
use crate::utils::Timezone;

/// What happens to an existing log file at startup
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum LogMode {
    /// Start each run with a fresh file (default)
    #[default]
    Truncate,
    /// Keep earlier sessions and add a new banner below them
    Append,
}

impl From<ConfigLogMode> for LogMode {
    fn from(mode: ConfigLogMode) -> Self {
        match mode {
            ConfigLogMode::Truncate => LogMode::Truncate,
            ConfigLogMode::Append => LogMode::Append,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "powerlog")]
#[command(
    about = "Log power supply status, uptime and GPU load at a fixed interval until interrupted",
    version
)]
pub(crate) struct Cli {
    /// Log file to write (default: /home/ubuntu/power_log.txt)
    #[arg(short, long, value_name = "PATH")]
    pub(crate) log_file: Option<PathBuf>,

    /// How to treat an existing log file
    #[arg(short, long, value_enum)]
    pub(crate) mode: Option<LogMode>,

    /// Seconds between samples (default: 1800)
    #[arg(short, long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) interval: Option<u64>,

    /// Stop after this many samples instead of waiting for a signal
    #[arg(short = 'n', long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) count: Option<u64>,

    /// Device name shown in the log title (default: "Jetson Xavier")
    #[arg(long, value_name = "NAME")]
    pub(crate) device: Option<String>,

    /// Directory of power supply entries
    #[arg(long, value_name = "DIR")]
    pub(crate) power_supply_dir: Option<PathBuf>,

    /// GPU load file, in tenths of a percent
    #[arg(long, value_name = "PATH")]
    pub(crate) gpu_load_file: Option<PathBuf>,

    /// Uptime source in /proc/uptime format
    #[arg(long, value_name = "PATH")]
    pub(crate) uptime_file: Option<PathBuf>,

    /// Timezone for timestamps (e.g., "UTC", "Asia/Shanghai"; default: local)
    #[arg(long, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Enable debug output on stderr
    #[arg(long)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.debug && config.debug {
            self.debug = true;
        }

        if self.mode.is_none() {
            self.mode = config.mode.map(LogMode::from);
        }
        if self.interval.is_none() {
            self.interval = config.interval_secs;
        }

        if self.log_file.is_none() {
            self.log_file = config.log_file.clone();
        }
        if self.device.is_none() {
            self.device = config.device.clone();
        }
        if self.power_supply_dir.is_none() {
            self.power_supply_dir = config.power_supply_dir.clone();
        }
        if self.gpu_load_file.is_none() {
            self.gpu_load_file = config.gpu_load_file.clone();
        }
        if self.uptime_file.is_none() {
            self.uptime_file = config.uptime_file.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }

        self
    }

    /// Fill remaining gaps with defaults and validate.
    ///
    /// clap already rejects a zero interval on the command line; this catches
    /// one coming from the config file.
    pub(crate) fn into_settings(self) -> Result<Settings, AppError> {
        let interval_secs = self.interval.unwrap_or(DEFAULT_INTERVAL_SECS);
        if interval_secs == 0 {
            return Err(AppError::InvalidInterval {
                secs: interval_secs,
            });
        }
        let timezone = Timezone::parse(self.timezone.as_deref())?;

        let defaults = SysPaths::default();
        let paths = SysPaths {
            power_supply_dir: self.power_supply_dir.unwrap_or(defaults.power_supply_dir),
            gpu_load_file: self.gpu_load_file.unwrap_or(defaults.gpu_load_file),
            uptime_file: self.uptime_file.unwrap_or(defaults.uptime_file),
        };

        Ok(Settings {
            log_file: self
                .log_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            mode: self.mode.unwrap_or_default(),
            interval: Duration::from_secs(interval_secs),
            count: self.count,
            device: self.device.unwrap_or_else(|| DEFAULT_DEVICE.to_string()),
            paths,
            timezone,
        })
    }
}
