//! Command-line flags for the server binary

use std::path::PathBuf;

use clap::Parser;

use super::server::{ServerConfig, ServerConfigError};

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "hil-server")]
#[command(about = "Human-in-the-loop workflow server", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct ServerArgs {
    /// Path to hil-server.toml (overrides the default search)
    #[arg(short, long, env = "CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Bind address
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Bind port
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Upper bound for one transform call, in milliseconds
    #[arg(long)]
    pub transform_timeout_ms: Option<u64>,

    /// Evict sessions idle for longer than this many seconds
    #[arg(long)]
    pub idle_ttl_secs: Option<u64>,

    /// Evict finished sessions idle for longer than this many seconds
    #[arg(long)]
    pub completed_ttl_secs: Option<u64>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long)]
    pub log_level: Option<String>,
}

impl ServerArgs {
    /// Load the config file (explicit path or default search) and apply the flags
    pub fn resolve(&self) -> Result<ServerConfig, ServerConfigError> {
        let config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::load()?,
        };
        let config = self.apply(config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(ms) = self.transform_timeout_ms {
            config.engine.transform_timeout_ms = Some(ms);
        }
        if let Some(secs) = self.idle_ttl_secs {
            config.sessions.idle_ttl_secs = Some(secs);
        }
        if let Some(secs) = self.completed_ttl_secs {
            config.sessions.completed_ttl_secs = Some(secs);
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        config
    }
}
