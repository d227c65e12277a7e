use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions; any of these ends the process with a non-zero status.
#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Failed to write log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Invalid interval: {secs} (must be at least 1 second)")]
    InvalidInterval { secs: u64 },

    #[error("Failed to install handler for signal {signal}: {source}")]
    SignalHandler {
        signal: i32,
        source: std::io::Error,
    },
}

/// A single sysfs/procfs field that exists but could not be read.
///
/// These never abort sampling; they are rendered into the log line instead.
#[derive(Debug, Error)]
pub(crate) enum ReadError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid value {value:?} in {}", path.display())]
    Parse { path: PathBuf, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_display_log_file() {
        let e = AppError::LogFile {
            path: PathBuf::from("/root/power_log.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            e.to_string(),
            "Failed to write log file /root/power_log.txt: denied"
        );
    }

    #[test]
    fn app_error_display_timezone() {
        let e = AppError::InvalidTimezone {
            input: "Mars/Olympus".to_string(),
        };
        assert_eq!(e.to_string(), "Invalid timezone: Mars/Olympus");
    }

    #[test]
    fn app_error_display_interval() {
        let e = AppError::InvalidInterval { secs: 0 };
        assert_eq!(
            e.to_string(),
            "Invalid interval: 0 (must be at least 1 second)"
        );
    }

    #[test]
    fn app_error_display_signal_handler() {
        let e = AppError::SignalHandler {
            signal: 15,
            source: std::io::Error::other("refused"),
        };
        assert_eq!(e.to_string(), "Failed to install handler for signal 15: refused");
    }

    #[test]
    fn read_error_parse_quotes_value() {
        let e = ReadError::Parse {
            path: PathBuf::from("/sys/devices/gpu.0/load"),
            value: "abc".to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"invalid value "abc" in /sys/devices/gpu.0/load"#
        );
    }

    #[test]
    fn read_error_io_includes_path() {
        let e = ReadError::Io {
            path: PathBuf::from("/sys/class/power_supply/BAT0/status"),
            source: std::io::Error::other("boom"),
        };
        assert_eq!(e.to_string(), "/sys/class/power_supply/BAT0/status: boom");
    }
}
