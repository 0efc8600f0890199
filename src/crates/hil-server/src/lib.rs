//! HTTP host for the human-in-the-loop workflow engine
//!
//! Wires a [`WorkflowEngine`] over the in-memory session store into an axum
//! router, and optionally runs a background sweeper that evicts idle sessions.

pub mod api;
pub mod config;
pub mod sweeper;
pub mod version;

use std::sync::Arc;

use hil_checkpoint::InMemorySessionStore;
use hil_core::{EngineConfig, WorkflowEngine};

pub use api::create_router;
pub use config::{ServerArgs, ServerConfig, ServerConfigError};

/// Build the engine described by `config`
pub fn build_engine(config: &ServerConfig) -> Arc<WorkflowEngine> {
    let mut engine_config = EngineConfig::new();
    if let Some(timeout) = config.transform_timeout() {
        engine_config = engine_config.with_transform_timeout(timeout);
    }

    Arc::new(
        WorkflowEngine::new(Arc::new(InMemorySessionStore::new())).with_config(engine_config),
    )
}
