//! Configuration management for the anime catalog browser.
//!
//! This module handles loading and parsing configuration from TOML files,
//! with sensible defaults for all settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Data directory settings
    #[serde(default)]
    pub data: DataConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Remote catalog API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Page behaviour settings
    #[serde(default)]
    pub browser: BrowserConfig,
}

/// Data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Root data directory path
    pub root_dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log directory path (relative to data directory or absolute)
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output (written to stderr)
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

/// Page controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Number of entries in a full page of the latest feed
    pub page_size: usize,

    /// Number of featured entries on the home page
    pub featured_count: usize,

    /// Resolution requested before the user picks one
    pub default_resolution: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root_dir: "data".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            default_level: "info".to_string(),
            console: false,
            file: true,
            json_format: false,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.sansekai.my.id/api".to_string(),
            timeout_seconds: 10,
            user_agent: concat!("anime-browser/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            featured_count: 5,
            default_resolution: "720p".to_string(),
        }
    }
}

impl ApiConfig {
    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration saved successfully"
        );

        Ok(())
    }

    /// Get the path for the data directory
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data.root_dir)
    }

    /// Get the absolute path for the log directory
    pub fn log_dir(&self) -> PathBuf {
        let log_path = Path::new(&self.logging.log_dir);
        if log_path.is_absolute() {
            log_path.to_path_buf()
        } else {
            self.data_dir().join(log_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data.root_dir, "data");
        assert_eq!(config.api.base_url, "https://api.sansekai.my.id/api");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.browser.page_size, 20);
        assert_eq!(config.browser.featured_count, 5);
        assert_eq!(config.browser.default_resolution, "720p");
    }

    #[test]
    fn test_save_and_load_config() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");

        let mut original_config = Config::default();
        original_config.browser.default_resolution = "480p".to_string();
        original_config.save(&config_path)?;

        assert!(config_path.exists());

        let loaded_config = Config::from_file(&config_path)?;
        assert_eq!(loaded_config.data.root_dir, original_config.data.root_dir);
        assert_eq!(loaded_config.api.base_url, original_config.api.base_url);
        assert_eq!(loaded_config.browser.default_resolution, "480p");

        Ok(())
    }

    #[test]
    fn test_partial_config_uses_section_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[api]\nbase_url = \"http://localhost:5173/api\"\ntimeout_seconds = 3\nuser_agent = \"test\"\n",
        )?;

        let config = Config::from_file(&config_path)?;
        assert_eq!(config.api.base_url, "http://localhost:5173/api");
        assert_eq!(config.api.timeout_seconds, 3);
        assert_eq!(config.browser.page_size, 20);
        assert_eq!(config.logging.default_level, "info");

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        // Should return default config without error
        assert_eq!(config.data.root_dir, "data");
    }

    #[test]
    fn test_invalid_config_is_an_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[api\nbroken")?;

        assert!(Config::from_file(&config_path).is_err());

        Ok(())
    }

    #[test]
    fn test_path_resolution() {
        let config = Config::default();

        let log_dir = config.log_dir();
        assert!(log_dir.ends_with("data/logs"));
    }
}
