//! Configuration file (`oaas.json`)
//!
//! ```json
//! {
//!   "data_dir": "/var/lib/oaas",
//!   "storage_mode": "durable",
//!   "actualization_policy": "once",
//!   "http": { "host": "0.0.0.0", "port": 8080, "cors_origins": [] }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::transition::ActualizationPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Tables only; nothing survives the process
    Memory,
    /// Tables rebuilt from `<data_dir>/data/records.log`
    #[default]
    Durable,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageMode::Memory => "memory",
            StorageMode::Durable => "durable",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Required when `storage_mode` is durable
    #[serde(default)]
    pub data_dir: Option<String>,

    #[serde(default)]
    pub storage_mode: StorageMode,

    #[serde(default)]
    pub actualization_policy: ActualizationPolicy,

    #[serde(default)]
    pub http: HttpServerConfig,
}

impl Config {
    /// Reads, parses and validates a configuration file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.storage_mode == StorageMode::Durable {
            match self.data_dir.as_deref() {
                Some(dir) if !dir.trim().is_empty() => {}
                _ => {
                    return Err(CliError::config_error(
                        "data_dir is required when storage_mode is 'durable'",
                    ))
                }
            }
        }

        self.http
            .validate()
            .map_err(|e| CliError::config_error(format!("http: {}", e)))?;

        Ok(())
    }

    /// Data directory, if one is configured.
    pub fn data_path(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(PathBuf::from)
    }

    /// Data directory, required for durable operations.
    pub fn require_data_path(&self) -> CliResult<PathBuf> {
        self.data_path()
            .ok_or_else(|| CliError::config_error("data_dir is not configured"))
    }
}
