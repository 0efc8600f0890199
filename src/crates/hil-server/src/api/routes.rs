//! API route definitions

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use hil_core::WorkflowEngine;

use crate::api::{
    handlers,
    middleware::{cors_layer, logging_layer},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<WorkflowEngine>,
}

/// Build the complete API router
pub fn create_router(engine: Arc<WorkflowEngine>) -> Router {
    let app_state = AppState { engine };

    Router::new()
        .route("/health", get(handlers::health))
        .route("/sessions", get(handlers::list_sessions))
        .route(
            "/workflow/:session_id",
            post(handlers::advance_workflow).get(handlers::get_workflow),
        )
        .layer(logging_layer())
        .layer(cors_layer())
        .with_state(app_state)
}
