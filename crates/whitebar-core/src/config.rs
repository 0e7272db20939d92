//! Optional diagnostics configuration.
//!
//! Read from `~/.config/whitebar/config.toml`. The file only controls
//! logging; the bar itself always starts from the same defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;

/// Top-level configuration.
///
/// Missing sections fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File logging settings.
    pub log: LogConfig,
}

impl Config {
    /// Clamps values to safe ranges.
    pub fn validate(&mut self) {
        self.log.max_file_mb = self.log.max_file_mb.clamp(1, 100);
    }

    /// Parses and validates TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(content)?;
        config.validate();
        Ok(config)
    }
}

/// Returns the config directory: `~/.config/whitebar/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("whitebar"))
}

/// Returns the config file path: `~/.config/whitebar/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse `config.toml`.
///
/// Returns `Ok(None)` when the file does not exist, or an error string
/// naming the file and what went wrong.
pub fn try_load() -> Result<Option<Config>, String> {
    let path = config_path().ok_or("could not determine config path")?;
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(format!("{}: {e}", path.display())),
    };
    Config::from_toml(&content)
        .map(Some)
        .map_err(|e| format!("{}: {e}", path.display()))
}

/// Loads the configuration, falling back to defaults.
///
/// A missing file silently yields defaults; any other problem is
/// reported on stderr first.
pub fn load() -> Config {
    match try_load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            Config::default()
        }
    }
}
