//! Layered configuration for the creature catalogue.
//!
//! Sources are merged in order, later sources winning:
//!
//! 1. built-in defaults ([`Config::default`]),
//! 2. a configuration file (TOML, YAML or JSON),
//! 3. environment variables prefixed with `POKEDEX_`, with nested keys
//!    separated by a double underscore (`POKEDEX_SERVER__BIND=0.0.0.0:80`).
//!
//! When no file is given explicitly, `config.toml`, `config.yaml` and
//! `config.json` in the platform configuration directory are tried, and any
//! that are missing are skipped.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_PREFIX: &str = "POKEDEX_";
const DATABASE_FILE: &str = "pokedex.sqlite3";

/// Platform directories for this application, if a home directory exists.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "pokedex")
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub remote: RemoteConfig,
    pub ingest: IngestConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file; created (with its parent directory) if missing.
    pub path: PathBuf,
}
impl Default for DatabaseConfig {
    fn default() -> Self {
        let path = match project_dirs() {
            Some(dirs) => dirs.data_dir().join(DATABASE_FILE),
            None => PathBuf::from(DATABASE_FILE),
        };
        Self { path }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}
impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2".to_string(),
            timeout_secs: 10,
        }
    }
}
impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Inclusive range of external identifiers fetched by one ingestion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub first: u32,
    pub last: u32,
}
impl Default for IngestConfig {
    fn default() -> Self {
        Self { first: 1, last: 50 }
    }
}
impl IngestConfig {
    pub fn range(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}
impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

impl Config {
    /// Load and validate configuration.
    ///
    /// An explicitly given `file` must exist; otherwise the default files in
    /// the platform configuration directory are used if present.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::from_figment(Self::figment(file)?)
    }

    /// Build the layered provider without extracting it.
    pub fn figment(file: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        match file {
            Some(path) => {
                if !path.is_file() {
                    exn::bail!(ErrorKind::MissingFile(path.to_path_buf()));
                }
                figment = match path.extension().and_then(|ext| ext.to_str()) {
                    Some("toml") => figment.merge(Toml::file_exact(path)),
                    Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
                    Some("json") => figment.merge(Json::file_exact(path)),
                    _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
                };
            },
            None => {
                if let Some(dirs) = project_dirs() {
                    let dir = dirs.config_dir();
                    figment = figment
                        .merge(Toml::file_exact(dir.join("config.toml")))
                        .merge(Yaml::file_exact(dir.join("config.yaml")))
                        .merge(Json::file_exact(dir.join("config.json")));
                }
            },
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Extract and validate configuration from an already-built provider.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.remote.base_url.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid("remote.base_url must not be empty"));
        }
        if self.remote.timeout_secs == 0 {
            exn::bail!(ErrorKind::Invalid("remote.timeout_secs must be greater than zero"));
        }
        if self.ingest.first == 0 {
            exn::bail!(ErrorKind::Invalid("ingest.first must be at least 1"));
        }
        if self.ingest.first > self.ingest.last {
            exn::bail!(ErrorKind::Invalid("ingest.first must not be greater than ingest.last"));
        }
        if self.log.level.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid("log.level must not be empty"));
        }
        Ok(())
    }
}
