//! REST API for the workflow engine
//!
//! - `POST /workflow/:session_id`: run one turn
//! - `GET /workflow/:session_id`: read a session without changing it
//! - `GET /sessions`: list active session ids
//! - `GET /health`: liveness probe

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;

pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use routes::{create_router, AppState};
