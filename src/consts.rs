/// Timestamp format used on every log line and in the banner/footer: "2025-01-15 08:30:00"
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) const DEFAULT_LOG_FILE: &str = "/home/ubuntu/power_log.txt";
pub(crate) const DEFAULT_POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";
pub(crate) const DEFAULT_GPU_LOAD_FILE: &str = "/sys/devices/gpu.0/load";
pub(crate) const DEFAULT_UPTIME_FILE: &str = "/proc/uptime";
pub(crate) const DEFAULT_DEVICE: &str = "Jetson Xavier";

/// 30 minutes between samples
pub(crate) const DEFAULT_INTERVAL_SECS: u64 = 1800;

/// Width of the `=` rule around the banner and footer
pub(crate) const SEPARATOR_WIDTH: usize = 50;

/// Power status when no power-supply entries are exposed
pub(crate) const UNKNOWN: &str = "Unknown";

/// GPU field when the load file does not exist
pub(crate) const NOT_AVAILABLE: &str = "N/A";
