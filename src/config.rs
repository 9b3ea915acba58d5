//! Layered configuration
//!
//! Values are resolved from built-in defaults, then an optional YAML file,
//! then `TICKET_DESK__*` environment variables (`__` separates nesting, so
//! `TICKET_DESK__SERVER__PORT=9000` sets `server.port`).

use crate::error::Result;
use config::{Config as ConfigSource, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "ticket-desk.yaml";

const ENV_PREFIX: &str = "TICKET_DESK";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
    /// Agent names registered at startup when not already present
    #[serde(default)]
    pub agents: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_storage_path(),
            agents: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn default_storage_path() -> PathBuf {
    ProjectDirs::from("dev", "ticket-desk", "ticket-desk")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".ticket-desk"))
}

impl Config {
    /// Loads configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] if it exists
    ///
    /// An explicitly given file must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).format(FileFormat::Yaml).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE)
                .format(FileFormat::Yaml)
                .required(false),
        };

        let defaults = Self::default();
        let source = ConfigSource::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("storage.backend", "file")?
            .set_default(
                "storage.path",
                defaults.storage.path.to_string_lossy().into_owned(),
            )?
            .set_default("log.level", defaults.log.level)?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(source.try_deserialize()?)
    }

    /// Socket address string the HTTP server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
