//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Display currency and locale defaults
//! - The active household and user ids for the CLI
//! - Query cache tuning
//!
//! Configuration is stored at `~/.config/hearth/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, Result};

/// Display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// Query cache preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Entry lifetime in seconds.
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/hearth/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Household the CLI operates on by default.
    #[serde(default)]
    pub active_household: Option<String>,
    /// User id recorded on created/completed records.
    #[serde(default)]
    pub active_user: Option<String>,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

// Default functions
fn default_currency() -> String {
    "EUR".to_string()
}
fn default_timezone() -> String {
    "Europe/Rome".to_string()
}
fn default_true() -> bool {
    true
}
fn default_cache_ttl() -> u64 {
    30
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            timezone: default_timezone(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: default_cache_ttl(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            active_household: None,
            active_user: None,
            display: DisplayConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file does
    /// not exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Config::default());
        }
        let raw = std::fs::read_to_string(&path)?;
        toml::from_str(&raw).map_err(|e| {
            ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Write the configuration to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    /// Read one value by dotted key (e.g. `display.currency`).
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "active_household" => self.active_household.clone().unwrap_or_default(),
            "active_user" => self.active_user.clone().unwrap_or_default(),
            "display.currency" => self.display.currency.clone(),
            "display.timezone" => self.display.timezone.clone(),
            "cache.enabled" => self.cache.enabled.to_string(),
            "cache.ttl_secs" => self.cache.ttl_secs.to_string(),
            _ => return Err(ConfigError::UnknownKey(key.to_string()).into()),
        };
        Ok(value)
    }

    /// Set one value by dotted key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "active_household" => self.active_household = Some(value.to_string()),
            "active_user" => self.active_user = Some(value.to_string()),
            "display.currency" => self.display.currency = value.to_string(),
            "display.timezone" => self.display.timezone = value.to_string(),
            "cache.enabled" => {
                self.cache.enabled = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("expected true/false, got '{value}'"),
                })?;
            }
            "cache.ttl_secs" => {
                self.cache.ttl_secs = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("expected an integer, got '{value}'"),
                })?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string()).into()),
        }
        Ok(())
    }
}
