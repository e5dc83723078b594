//! Configuration management for odontogram.
//!
//! Handles loading of user preferences: chart layout, the
//! record location, the read-only flag and the log level.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::record::ChartRecord;

/// Main configuration struct
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Layout configuration
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Chart record file; defaults to the user data directory
    #[serde(default)]
    pub record_path: Option<PathBuf>,

    /// Open the chart for viewing only (finalized records)
    #[serde(default)]
    pub read_only: bool,

    /// Log level passed to the file logger (e.g. "info", "odontogram=debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            record_path: None,
            read_only: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from disk, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.layout.validate();

        Ok(config)
    }

    /// Record path to use: CLI argument, then config, then the default location
    pub fn resolve_record_path(&self, cli_override: Option<PathBuf>) -> Result<PathBuf> {
        match cli_override.or_else(|| self.record_path.clone()) {
            Some(path) => Ok(path),
            None => ChartRecord::default_path(),
        }
    }

    /// Get the path to the config file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not find config directory")?;

        Ok(config_dir.join("odontogram").join("config.json"))
    }
}

/// Layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Detail panel width as percentage (20-60%)
    #[serde(default = "default_detail_width")]
    pub detail_width_pct: u8,

    /// Whether the primary dentition rows are drawn
    #[serde(default = "default_show_primary")]
    pub show_primary: bool,
}

fn default_detail_width() -> u8 {
    35
}

fn default_show_primary() -> bool {
    true
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            detail_width_pct: default_detail_width(),
            show_primary: default_show_primary(),
        }
    }
}

impl LayoutConfig {
    /// Validate and clamp detail panel width to valid range (20-60%)
    pub fn validate(&mut self) {
        self.detail_width_pct = self.detail_width_pct.clamp(20, 60);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.layout.detail_width_pct, 35);
        assert!(config.layout.show_primary);
        assert!(!config.read_only);
        assert_eq!(config.log_level, "info");
        assert!(config.record_path.is_none());
    }

    #[test]
    fn test_layout_validate() {
        let mut layout = LayoutConfig {
            detail_width_pct: 5, // Below minimum
            ..Default::default()
        };
        layout.validate();
        assert_eq!(layout.detail_width_pct, 20);

        let mut layout = LayoutConfig {
            detail_width_pct: 90, // Above maximum
            ..Default::default()
        };
        layout.validate();
        assert_eq!(layout.detail_width_pct, 60);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"read_only": true}"#).unwrap();
        assert!(config.read_only);
        assert_eq!(config.log_level, "info");
        assert!(config.layout.show_primary);
    }

    #[test]
    fn test_load_from_clamps_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"layout": {"detail_width_pct": 99}}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.layout.detail_width_pct, 60);
    }

    #[test]
    fn test_load_from_reads_saved_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            read_only: true,
            record_path: Some(PathBuf::from("/records/patient.json")),
            ..Default::default()
        };
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(loaded.read_only);
        assert_eq!(loaded.record_path, Some(PathBuf::from("/records/patient.json")));
    }

    #[test]
    fn test_cli_record_path_wins() {
        let config = Config {
            record_path: Some(PathBuf::from("/from/config.json")),
            ..Default::default()
        };
        let path = config
            .resolve_record_path(Some(PathBuf::from("/from/cli.json")))
            .unwrap();
        assert_eq!(path, PathBuf::from("/from/cli.json"));

        let path = config.resolve_record_path(None).unwrap();
        assert_eq!(path, PathBuf::from("/from/config.json"));
    }

    #[test]
    fn test_malformed_config_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
