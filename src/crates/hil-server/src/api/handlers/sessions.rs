//! Session listing endpoint handler

use axum::{extract::State, Json};

use crate::api::{error::ApiResult, models::SessionsResponse, routes::AppState};

/// Handler for GET /sessions
pub async fn list_sessions(State(state): State<AppState>) -> ApiResult<Json<SessionsResponse>> {
    let active_sessions = state.engine.sessions().await?;
    Ok(Json(SessionsResponse { active_sessions }))
}
