use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigLogMode {
    Truncate,
    Append,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) log_file: Option<PathBuf>,
    #[serde(default)]
    pub(crate) mode: Option<ConfigLogMode>,
    #[serde(default)]
    pub(crate) interval_secs: Option<u64>,
    #[serde(default)]
    pub(crate) device: Option<String>,
    #[serde(default)]
    pub(crate) power_supply_dir: Option<PathBuf>,
    #[serde(default)]
    pub(crate) gpu_load_file: Option<PathBuf>,
    #[serde(default)]
    pub(crate) uptime_file: Option<PathBuf>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) debug: bool,
}

/// Outcome of config discovery, reported once logging is up
#[derive(Debug, Default)]
pub(crate) struct LoadedConfig {
    pub(crate) config: Config,
    pub(crate) source: Option<PathBuf>,
    pub(crate) skipped: Vec<(PathBuf, String)>,
}

impl Config {
    /// First config file that exists and parses, or defaults.
    ///
    /// Runs before the logger is installed (the file may enable debug
    /// output), so nothing is logged here.
    pub(crate) fn load() -> LoadedConfig {
        let mut loaded = LoadedConfig::default();
        for path in Self::get_config_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from(&path) {
                Ok(config) => {
                    loaded.config = config;
                    loaded.source = Some(path);
                    return loaded;
                }
                Err(e) => loaded.skipped.push((path, e)),
            }
        }
        loaded
    }

    fn load_from(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        toml::from_str::<Config>(&content).map_err(|e| e.to_string())
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/powerlog/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("powerlog").join("config.toml"));
        }

        // 2. Platform config dir ($XDG_CONFIG_HOME on Linux)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("powerlog").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.powerlog.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".powerlog.toml"));
        }

        paths
    }
}
