//! Application configuration.
//!
//! Loaded from a TOML file, every section optional:
//!
//! ```toml
//! history_path = "data/indicators.parquet"
//! log_filter = "liquidity_regime=debug"
//!
//! [thresholds]
//! stress_vix = 22.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::regime::ScenarioThresholds;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Classification thresholds. Unlisted values keep their defaults.
    pub thresholds: ScenarioThresholds,

    /// Default indicator history file for the CLI.
    pub history_path: Option<PathBuf>,

    /// `tracing` filter directive, overridden by `RUST_LOG`.
    pub log_filter: Option<String>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
