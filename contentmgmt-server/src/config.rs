//! Server configuration, read from a TOML file.
//!
//! ```toml
//! port = 5601
//! log_filter = "info"
//!
//! [registry]
//! on_duplicate = "replace"   # or "reject"
//!
//! [[content_types]]
//! id = "dashboard"
//! latest_version = 2
//! ```
//!
//! Every key is optional. A missing file means defaults; so does a file
//! that cannot be read or parsed, with a warning.

use contentmgmt_core::DuplicatePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 5601;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// `tracing_subscriber::EnvFilter` directives.
    pub log_filter: String,
    pub registry: RegistryConfig,
    pub content_types: Vec<ContentTypeConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            log_filter: "info".to_string(),
            registry: RegistryConfig::default(),
            content_types: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub on_duplicate: DuplicatePolicy,
}

/// A content type served from in-memory storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeConfig {
    pub id: String,
    #[serde(default = "default_latest_version")]
    pub latest_version: u32,
}

fn default_latest_version() -> u32 {
    1
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Missing(PathBuf),
    Invalid { path: PathBuf, reason: String },
}

impl ConfigSource {
    /// Reports the outcome of [`ServerConfig::read`].
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded configuration from {:?}", path),
            ConfigSource::Missing(path) => {
                info!("No configuration file found at {:?}, using defaults", path);
            }
            ConfigSource::Invalid { path, reason } => warn!(
                "Failed to load configuration {:?}: {}. Falling back to defaults.",
                path, reason
            ),
        }
    }
}

impl ServerConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Reads `path` without logging, so the caller can set up logging from
    /// the result first. Falls back to defaults on any failure.
    pub fn read(path: &Path) -> (Self, ConfigSource) {
        if !path.exists() {
            return (Self::default(), ConfigSource::Missing(path.to_path_buf()));
        }

        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|contents| Self::from_toml_str(&contents).map_err(|e| e.to_string()));
        match parsed {
            Ok(config) => (config, ConfigSource::File(path.to_path_buf())),
            Err(reason) => (
                Self::default(),
                ConfigSource::Invalid {
                    path: path.to_path_buf(),
                    reason,
                },
            ),
        }
    }

    /// Like [`read`](Self::read), logging the outcome.
    pub fn load_from(path: &Path) -> Self {
        let (config, source) = Self::read(path);
        source.log();
        config
    }
}
