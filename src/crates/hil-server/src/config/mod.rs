//! Configuration module for hil-server
//!
//! - [`server`]: the TOML file (`hil-server.toml`)
//! - [`cli`]: command-line and environment overrides applied on top of it

pub mod cli;
pub mod server;

pub use cli::ServerArgs;
pub use server::{
    EngineSettings, LoggingConfig, ServerConfig, ServerConfigError, ServerInfoConfig,
    SessionSettings,
};
