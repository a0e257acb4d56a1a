//! ==============================================================================
//! config.rs - Server Configuration Loader
//! ==============================================================================
//!
//! purpose:
//!     defines the schema for `server.toml`.
//!     loads configuration from file or falls back to defaults.
//!     values are read once at startup and never reloaded.
//!
//! structure:
//!     - ServerSection: where the HTTP listener binds.
//!     - StorageConfig: log file path, retention window, log backlog bound.
//!     - LoggingConfig: console verbosity.
//!
//! ==============================================================================

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::history::DEFAULT_MAX_READINGS;

/// Root configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSection {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub log_file: PathBuf,
    /// retention window of the in-memory history
    pub max_readings: usize,
    /// readings allowed to wait for the log writer before new ones are dropped
    pub sink_queue_depth: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub show_sensor_data: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("/tmp/water-tank-sensor.log"),
            max_readings: DEFAULT_MAX_READINGS,
            sink_queue_depth: 256,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            show_sensor_data: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: ServerConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.storage.max_readings > 0, "storage.max_readings must be at least 1");
        anyhow::ensure!(
            self.storage.sink_queue_depth > 0,
            "storage.sink_queue_depth must be at least 1"
        );
        Ok(())
    }

    /// Load with default fallback
    ///
    /// an explicit path is tried first, then `config/server.toml` and
    /// `../config/server.toml`.
    pub fn load_or_default(explicit: Option<PathBuf>) -> Self {
        let mut paths: Vec<PathBuf> = explicit.into_iter().collect();
        paths.push(PathBuf::from("config").join("server.toml"));
        paths.push(PathBuf::from("..").join("config").join("server.toml"));

        for path in &paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        tracing::info!("[CONFIG] Loaded from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("[CONFIG] Warning: Failed to load {}: {}", path.display(), e);
                    }
                }
            }
        }

        tracing::warn!("[CONFIG] Warning: No usable config file found - using defaults");
        Self::default()
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }

    /// Log configuration summary
    pub fn print_summary(&self) {
        tracing::info!("[CONFIG] Listen: {}", self.listen_addr());
        tracing::info!("[CONFIG] Log file: {}", self.storage.log_file.display());
        tracing::info!("[CONFIG] Max readings: {}", self.storage.max_readings);
        tracing::info!("[CONFIG] Log level: {}", self.logging.level);
    }
}
