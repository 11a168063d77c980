//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`DEPOT_*`)
//! 2. Config file (`depot.toml`)
//! 3. Defaults (this file)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Config file location (directories::ProjectDirs)                        │
//! │     ~/.config/depot/depot.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.depot.depot/depot.toml (macOS)   │
//! │     %APPDATA%\depot\depot\config\depot.toml (Windows)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```toml
//! # depot.toml
//! database_path = "/srv/depot/depot.db"
//! allow_negative_stock = false
//! low_stock_alerts = true
//! ```
//!
//! Configuration is read-only after startup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::ConfigError;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Database file. Default: `depot.db` in the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Let stock-out drive stock below zero.
    /// Default: false
    pub allow_negative_stock: bool,

    /// Show the low-stock warning after each refresh.
    /// Default: true
    pub low_stock_alerts: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: None,
            allow_negative_stock: false,
            low_stock_alerts: true,
        }
    }
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`depot.toml`, or `config_path` when given)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads config or returns defaults (with env overrides) if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            let mut config = Self::default();
            config.apply_env_overrides();
            config
        })
    }

    /// Parses a `depot.toml` document; missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `DEPOT_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup` (keyed by environment variable name).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("DEPOT_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }

        if let Some(value) = lookup("DEPOT_ALLOW_NEGATIVE_STOCK") {
            match parse_flag(&value) {
                Some(flag) => self.allow_negative_stock = flag,
                None => warn!(value = %value, "Ignoring DEPOT_ALLOW_NEGATIVE_STOCK"),
            }
        }

        if let Some(value) = lookup("DEPOT_LOW_STOCK_ALERTS") {
            match parse_flag(&value) {
                Some(flag) => self.low_stock_alerts = flag,
                None => warn!(value = %value, "Ignoring DEPOT_LOW_STOCK_ALERTS"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "depot", "depot")
            .map(|dirs| dirs.config_dir().join("depot.toml"))
    }
}

/// Accepts the usual spellings of a boolean switch.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
