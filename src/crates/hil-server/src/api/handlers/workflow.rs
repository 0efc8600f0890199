//! Workflow turn endpoint handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use hil_core::TurnOutcome;

use crate::api::{
    error::{ApiError, ApiResult},
    models::TurnRequest,
    routes::AppState,
};

/// Handler for POST /workflow/:session_id
///
/// Runs one turn. Unknown sessions are created on the fly. A body that does
/// not parse is answered with the standard error shape.
pub async fn advance_workflow(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    body: Result<Json<TurnRequest>, JsonRejection>,
) -> ApiResult<Json<TurnOutcome>> {
    let Json(req) = body?;
    let outcome = state
        .engine
        .advance(&session_id, &req.input, req.action)
        .await?;
    Ok(Json(outcome))
}

/// Handler for GET /workflow/:session_id
///
/// Read-only; never creates the session.
pub async fn get_workflow(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<TurnOutcome>> {
    state
        .engine
        .snapshot(&session_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("session '{}'", session_id)))
}
