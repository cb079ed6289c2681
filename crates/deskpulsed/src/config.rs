//! Configuration management for deskpulsed.
//!
//! Loads settings from /etc/deskpulse/config.toml or uses defaults.
//! `DESKPULSE_BIND` and `DESKPULSE_DB` override the file, and command-line
//! flags override both.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/deskpulse/config.toml";

/// Default config file path for fallback
pub const DEFAULT_CONFIG_PATH: &str = "/var/lib/deskpulse/config.toml";

/// System state directory, used for the database when it exists
pub const STATE_DIR: &str = "/var/lib/deskpulse";

/// Database file name
pub const DB_FILE_NAME: &str = "employee_performance.db";

pub const ENV_BIND: &str = "DESKPULSE_BIND";
pub const ENV_DB: &str = "DESKPULSE_DB";

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// SQLite storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the SQLite database file
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// How long a connection waits on a locked database before failing
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_ms: u64,
}

fn default_db_path() -> PathBuf {
    let system_dir = PathBuf::from(STATE_DIR);
    if system_dir.exists() {
        return system_dir.join(DB_FILE_NAME);
    }

    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("deskpulse")
        .join(DB_FILE_NAME)
}

fn default_busy_timeout() -> u64 {
    5_000
}

impl StorageConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            busy_timeout_ms: default_busy_timeout(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Full daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub log: LogConfig,

    /// File the config was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load config from an explicit path, or from the standard locations.
    ///
    /// An explicit path must exist and parse. A standard location that does
    /// not exist is skipped; one that exists must parse. With no file found
    /// the defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()));
        }

        Self::load_first(&[Path::new(CONFIG_PATH), Path::new(DEFAULT_CONFIG_PATH)])
    }

    /// Load the first candidate that exists, or the defaults if none does
    fn load_first(candidates: &[&Path]) -> Result<Self> {
        for path in candidates {
            match Self::load_from_path(path) {
                Ok(config) => return Ok(config),
                Err(e) if is_not_found(&e) => continue,
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to load config from {}", path.display()))
                }
            }
        }

        warn!("Config not found, using defaults");
        Ok(Config::default())
    }

    /// Load config from specific path
    fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.source = Some(path.to_path_buf());
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply `DESKPULSE_BIND` / `DESKPULSE_DB` from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(ENV_BIND).filter(|v| !v.trim().is_empty()) {
            self.server.bind = bind.trim().to_string();
        }
        if let Some(db) = lookup(ENV_DB).filter(|v| !v.trim().is_empty()) {
            self.storage.db_path = PathBuf::from(db.trim());
        }
    }
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}
