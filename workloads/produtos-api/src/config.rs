//! Handler configuration.

use produtos_observability::{LogFormat, LogLevel};
use produtos_store::DEFAULT_KEY_PREFIX;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the product handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Key-value store the table lives in.
    pub store_name: String,
    /// Collection segment of the URL (`/produtos`).
    pub collection: String,
    /// Prefix of every record key in the store.
    pub key_prefix: String,
    /// Minimum log level.
    pub log_level: LogLevel,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            store_name: "default".to_string(),
            collection: "produtos".to_string(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Json,
        }
    }
}

impl HandlerConfig {
    /// Build from a key lookup (e.g. Spin variables). Missing keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("store_name") {
            config.store_name = value;
        }
        if let Some(value) = lookup("collection") {
            config.collection = value;
        }
        if let Some(value) = lookup("key_prefix") {
            config.key_prefix = value;
        }
        if let Some(value) = lookup("log_level") {
            config.log_level = value.parse().map_err(|e| ConfigError::Invalid {
                key: "log_level",
                message: format!("{}", e),
            })?;
        }
        if let Some(value) = lookup("log_format") {
            config.log_format = value.parse().map_err(|e| ConfigError::Invalid {
                key: "log_format",
                message: format!("{}", e),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "store_name",
                message: "must not be empty".to_string(),
            });
        }
        let collection = self.collection.trim();
        if collection.is_empty() || collection.contains('/') {
            return Err(ConfigError::Invalid {
                key: "collection",
                message: "must be a single non-empty path segment".to_string(),
            });
        }
        Ok(())
    }
}
