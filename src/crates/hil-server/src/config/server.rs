//! Server configuration for hil-server
//!
//! Loads and parses hil-server.toml. Every section and field is optional;
//! anything left out falls back to the built-in defaults.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use hil_checkpoint::IdleTimeout;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(toml::de::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Listener and identification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerInfoConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Server name reported in logs
    pub name: String,
}

impl Default for ServerInfoConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            name: "hil-server".to_string(),
        }
    }
}

/// Workflow engine settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Upper bound for one transform call in milliseconds. Unset waits indefinitely.
    pub transform_timeout_ms: Option<u64>,
}

/// Session retention settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Evict sessions idle for longer than this. Unset keeps sessions for the
    /// life of the process.
    pub idle_ttl_secs: Option<u64>,
    /// Shorter limit for sessions that reached COMPLETE
    pub completed_ttl_secs: Option<u64>,
    /// How often the sweeper looks for idle sessions
    pub sweep_interval_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            idle_ttl_secs: None,
            completed_ttl_secs: None,
            sweep_interval_secs: 60,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerInfoConfig,
    pub engine: EngineSettings,
    pub sessions: SessionSettings,
    pub logging: LoggingConfig,
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ServerConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ServerConfigError::ReadError)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ServerConfigError> {
        let config: Self = toml::from_str(content).map_err(ServerConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default locations
    ///
    /// Searches for config in:
    /// 1. CONFIG_PATH environment variable
    /// 2. ./config/hil-server.toml
    /// 3. ./hil-server.toml
    ///
    /// Falls back to defaults when no file is found. A file that exists but
    /// cannot be read or parsed is an error.
    pub fn load() -> Result<Self, ServerConfigError> {
        if let Ok(config_path) = std::env::var("CONFIG_PATH") {
            return Self::from_file(config_path);
        }

        let paths = [
            PathBuf::from("config/hil-server.toml"),
            PathBuf::from("./hil-server.toml"),
        ];

        for path in &paths {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), ServerConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ServerConfigError::InvalidConfig(
                "server.host must not be empty".to_string(),
            ));
        }
        if self.eviction_policy().is_some() && self.sessions.sweep_interval_secs == 0 {
            return Err(ServerConfigError::InvalidConfig(
                "sessions.sweep_interval_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> Result<SocketAddr, ServerConfigError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| {
                ServerConfigError::InvalidConfig(format!(
                    "invalid bind address {}:{}: {}",
                    self.server.host, self.server.port, e
                ))
            })
    }

    pub fn transform_timeout(&self) -> Option<Duration> {
        self.engine.transform_timeout_ms.map(Duration::from_millis)
    }

    /// Policy for the idle sweeper, `None` when sessions are kept for the
    /// life of the process
    pub fn eviction_policy(&self) -> Option<IdleTimeout> {
        let sessions = &self.sessions;
        let policy = match (sessions.idle_ttl_secs, sessions.completed_ttl_secs) {
            (None, None) => return None,
            (Some(idle), _) => IdleTimeout::from_secs(idle),
            (None, Some(_)) => IdleTimeout::from_secs(u64::MAX),
        };
        Some(match sessions.completed_ttl_secs {
            Some(completed) => policy.with_completed_secs(completed),
            None => policy,
        })
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sessions.sweep_interval_secs)
    }
}
