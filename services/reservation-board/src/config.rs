//! Configuration types for the reservation board

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Reject values that would only fail later at request or render time
    pub fn validate(&self) -> crate::Result<()> {
        let base = self.source.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(crate::BoardError::Config(format!(
                "source.base_url must be an http(s) URL, got '{}'",
                self.source.base_url
            )));
        }
        if self.source.timeout_seconds == 0 {
            return Err(crate::BoardError::Config(
                "source.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if StrftimeItems::new(&self.display.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(crate::BoardError::Config(format!(
                "display.date_format is not a valid strftime pattern: '{}'",
                self.display.date_format
            )));
        }
        Ok(())
    }
}

/// Where the reservation list comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            path: default_path(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl SourceConfig {
    /// Full URL of the reservations endpoint
    pub fn reservations_url(&self) -> String {
        let base = self.base_url.trim().trim_end_matches('/');
        let path = self.path.trim();
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_dashboard_port")]
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_dashboard_port(),
        }
    }
}

/// How reservation times are shown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Render in UTC instead of the host's local zone
    #[serde(default)]
    pub utc: bool,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc: false,
            date_format: default_date_format(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_path() -> String {
    "/reservations".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_dashboard_port() -> u16 {
    3000
}

fn default_date_format() -> String {
    "%-m/%-d/%Y, %-I:%M:%S %p".to_string()
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::BoardError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
