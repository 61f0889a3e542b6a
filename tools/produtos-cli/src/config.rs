//! CLI configuration.

use anyhow::{Context, Result};
use produtos_api::HandlerConfig;
use serde::{Deserialize, Serialize};

/// Default table file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "produtos-data.json";

/// Config file names searched from the working directory upwards.
pub const CONFIG_NAMES: [&str; 2] = ["produtos.toml", ".produtos.toml"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Settings handed to the request handler.
    #[serde(default)]
    pub handler: HandlerConfig,

    /// Local runner settings.
    #[serde(default)]
    pub local: LocalConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(&content).with_context(|| format!("Invalid config file: {}", path))
    }

    /// Parse TOML text and check the handler section.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML config")?;
        config.handler.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render config")
    }
}

/// Local runner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    /// JSON file holding the table.
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}
