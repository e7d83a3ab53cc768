//! Configuration management for slicetui.
//!
//! Handles persistence and loading of user preferences: where installed
//! packages live, how often the authority list refreshes, and the default
//! display density.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::slice::DisplayMode;

/// Main configuration struct
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding installed packages (one subdirectory per package,
    /// each with a `package.toml` manifest).
    #[serde(default = "default_packages_dir")]
    pub packages_dir: PathBuf,

    /// Authority refresh period in seconds.
    #[serde(default = "default_refresh_period_secs")]
    pub refresh_period_secs: u64,

    /// Display density selected on startup.
    #[serde(default)]
    pub default_mode: DisplayMode,
}

fn default_packages_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("slicetui")
        .join("packages")
}

fn default_refresh_period_secs() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            packages_dir: default_packages_dir(),
            refresh_period_secs: default_refresh_period_secs(),
            default_mode: DisplayMode::default(),
        }
    }
}

impl Config {
    /// Load configuration from disk, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate and clamp values to sane ranges (1s to 1h refresh).
    pub fn validate(&mut self) {
        self.refresh_period_secs = self.refresh_period_secs.clamp(1, 3600);
    }

    /// Refresh period as a `Duration`.
    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_period_secs)
    }

    /// Get the path to the config file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?;

        Ok(config_dir.join("slicetui").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.refresh_period_secs, 5);
        assert_eq!(config.default_mode, DisplayMode::Large);
        assert!(config.packages_dir.ends_with("slicetui/packages"));
    }

    #[test]
    fn test_validate_clamps_refresh_period() {
        let mut config = Config {
            refresh_period_secs: 0,
            ..Default::default()
        };
        config.validate();
        assert_eq!(config.refresh_period_secs, 1);

        let mut config = Config {
            refresh_period_secs: 86400,
            ..Default::default()
        };
        config.validate();
        assert_eq!(config.refresh_period_secs, 3600);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.refresh_period_secs, config.refresh_period_secs);
        assert_eq!(parsed.default_mode, config.default_mode);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = serde_json::from_str(r#"{"refresh_period_secs": 30}"#).unwrap();
        assert_eq!(parsed.refresh_period_secs, 30);
        assert_eq!(parsed.default_mode, DisplayMode::Large);
    }
}
