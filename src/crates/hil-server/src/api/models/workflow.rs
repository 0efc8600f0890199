//! Workflow turn DTOs

use hil_core::Action;
use serde::{Deserialize, Serialize};

/// Body of `POST /workflow/:session_id`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRequest {
    /// Free text carried by the action; ignored by actions that take none
    #[serde(default)]
    pub input: String,

    /// Any string; unrecognised values are ignored by the engine
    pub action: Action,
}

/// Body of `GET /sessions`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionsResponse {
    pub active_sessions: Vec<String>,
}
