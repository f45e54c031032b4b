//! Configuration loading for inbox indexing.
//!
//! Layered config: defaults -> config file -> env vars.
//! Default config file lives at `<platform config dir>/inbox-index/config.*`.

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::TypesError;

/// Schema version of the per-conversation index record.
///
/// Bumped whenever the record layout changes; combined with the index
/// format version into the stamp stored on every record.
pub const RECORD_SCHEMA_VERSION: u32 = 3;

/// Indexing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSettings {
    /// Version of the external full-text index format
    #[serde(default = "default_index_version")]
    pub index_version: u32,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_index_version() -> u32 {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            index_version: default_index_version(),
            log_level: default_log_level(),
        }
    }
}

impl IndexSettings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file in the platform config dir (optional)
    /// 3. Caller-specified config file (required when given)
    /// 4. Environment variables (INBOX_INDEX_*)
    pub fn load(config_path: Option<&str>) -> Result<Self, TypesError> {
        let config_dir = ProjectDirs::from("", "", "inbox-index")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("index_version", default_index_version() as i64)
            .map_err(|e| TypesError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| TypesError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // INBOX_INDEX_INDEX_VERSION, INBOX_INDEX_LOG_LEVEL
        builder = builder.add_source(
            Environment::with_prefix("INBOX_INDEX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: IndexSettings = builder
            .build()
            .map_err(|e| TypesError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TypesError::Config(e.to_string()))?;

        settings.validate().map_err(TypesError::Config)?;
        Ok(settings)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.index_version == 0 {
            return Err("index_version must be > 0".to_string());
        }
        Ok(())
    }

    /// Combined `"{index}:{record}"` version stamped on index records.
    pub fn record_version(&self) -> String {
        format!("{}:{}", self.index_version, RECORD_SCHEMA_VERSION)
    }
}
