//! Per-session workflow state
//!
//! [`WorkflowState`] is the unit the store persists: one record per session,
//! replaced wholesale after every turn. The serialized form is what callers see
//! as `currentState`, so field names are camelCase and stages are
//! SCREAMING_SNAKE_CASE.
//!
//! ```text
//! COLLECTING ──▶ TRANSFORMING ──▶ AWAITING_APPROVAL ──▶ UPLOADING ──▶ COMPLETE
//!    ↺ (index < 4)                   ↺ (not approved)     ↺ (not confirmed)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of details collected before the transformation runs
pub const REQUIRED_DETAILS: usize = 4;

/// A named state of the workflow state machine.
///
/// Variants are declared in pipeline order, so the derived `Ord` is the
/// progress order: a session's stage never compares lower than a stage it
/// has already held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    /// Gathering details from the human
    Collecting,
    /// Deriving the transformed output (never waits for input)
    Transforming,
    /// Paused until the human approves or overrides the output
    AwaitingApproval,
    /// Paused until the human confirms the upload
    Uploading,
    /// Terminal
    Complete,
}

impl Stage {
    /// All stages in pipeline order
    pub const ALL: [Stage; 5] = [
        Stage::Collecting,
        Stage::Transforming,
        Stage::AwaitingApproval,
        Stage::Uploading,
        Stage::Complete,
    ];

    /// Wire name of the stage
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Collecting => "COLLECTING",
            Stage::Transforming => "TRANSFORMING",
            Stage::AwaitingApproval => "AWAITING_APPROVAL",
            Stage::Uploading => "UPLOADING",
            Stage::Complete => "COMPLETE",
        }
    }

    /// Whether a turn stops once it lands on this stage.
    ///
    /// Only `Transforming` is passed through within a single turn.
    pub fn is_pause(&self) -> bool {
        !matches!(self, Stage::Transforming)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Complete)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prompt shown while collecting the detail at `index` (zero based)
pub fn detail_prompt(index: usize) -> String {
    format!("Please provide detail #{}", index + 1)
}

/// Snapshot of one session's progress through the workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowState {
    /// Details supplied so far, in arrival order
    pub collected_details: Vec<String>,

    /// Number of details accepted, capped at [`REQUIRED_DETAILS`]
    pub detail_index: usize,

    /// Output of the transformation, absent until collection completes
    pub transformed_output: Option<Vec<String>>,

    /// Set by an explicit approval, never reset within a session
    pub transform_approved: bool,

    /// Set by an explicit upload confirmation
    pub upload_confirmed: bool,

    /// Current stage
    pub stage: Stage,

    /// Latest status or prompt for the human
    pub message: String,
}

impl WorkflowState {
    /// The canonical state every new or restarted session begins in
    pub fn initial() -> Self {
        Self {
            collected_details: Vec::new(),
            detail_index: 0,
            transformed_output: None,
            transform_approved: false,
            upload_confirmed: false,
            stage: Stage::Collecting,
            message: detail_prompt(0),
        }
    }

    /// Whether enough details have been collected to leave `Collecting`
    pub fn details_complete(&self) -> bool {
        self.detail_index >= REQUIRED_DETAILS
    }

    pub fn is_complete(&self) -> bool {
        self.stage.is_terminal()
    }
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_canonical() {
        let state = WorkflowState::initial();
        assert_eq!(state.stage, Stage::Collecting);
        assert_eq!(state.detail_index, 0);
        assert!(state.collected_details.is_empty());
        assert!(state.transformed_output.is_none());
        assert!(!state.transform_approved);
        assert!(!state.upload_confirmed);
        assert_eq!(state.message, "Please provide detail #1");
        assert_eq!(state, WorkflowState::default());
    }

    #[test]
    fn test_stage_order_follows_pipeline() {
        for pair in Stage::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} should precede {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_only_transforming_is_transient() {
        let transient: Vec<_> = Stage::ALL.iter().filter(|s| !s.is_pause()).collect();
        assert_eq!(transient, vec![&Stage::Transforming]);
    }

    #[test]
    fn test_only_complete_is_terminal() {
        let terminal: Vec<Stage> = Stage::ALL.into_iter().filter(Stage::is_terminal).collect();
        assert_eq!(terminal, vec![Stage::Complete]);

        let mut state = WorkflowState::initial();
        assert!(!state.is_complete());
        state.stage = Stage::Complete;
        assert!(state.is_complete());
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(WorkflowState::initial()).unwrap();
        assert_eq!(value["stage"], "COLLECTING");
        assert_eq!(value["detailIndex"], 0);
        assert_eq!(value["collectedDetails"], serde_json::json!([]));
        assert!(value["transformedOutput"].is_null());
        assert_eq!(value["transformApproved"], false);
        assert_eq!(value["uploadConfirmed"], false);
    }

    #[test]
    fn test_stage_wire_names_match_serde() {
        for stage in Stage::ALL {
            let json = serde_json::to_value(stage).unwrap();
            assert_eq!(json, stage.as_str());
        }
    }
}
