//! Inbound actions and the required action advertised back to the caller
//!
//! An [`Action`] is what the human sent this turn; a [`RequiredAction`] is
//! what the workflow is waiting for next. Actions only take effect in the
//! stage that expects them. Anything else is ignored and reported as a soft
//! warning, never as an error.

use std::fmt;

use hil_checkpoint::{Stage, WorkflowState};
use serde::{Deserialize, Serialize};

/// Action supplied with a turn
///
/// Deserializes from any string so that unrecognised values reach the engine
/// (and are ignored there) instead of failing request parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    /// Reset the session to its initial state
    Start,
    /// Supply the next detail (`COLLECTING`)
    ProvideDetail,
    /// Approve the transformed output, optionally replacing it (`AWAITING_APPROVAL`)
    ModifyTransform,
    /// Confirm the upload (`UPLOADING`)
    ConfirmUpload,
    /// Anything else
    Unknown(String),
}

impl Action {
    pub fn as_str(&self) -> &str {
        match self {
            Action::Start => "start",
            Action::ProvideDetail => "provide_detail",
            Action::ModifyTransform => "modify_transform",
            Action::ConfirmUpload => "confirm_upload",
            Action::Unknown(raw) => raw.as_str(),
        }
    }

    /// The stage this action is accepted in. `None` for `Start` (any stage)
    /// and for unrecognised actions (no stage).
    pub fn accepted_in(&self) -> Option<Stage> {
        match self {
            Action::ProvideDetail => Some(Stage::Collecting),
            Action::ModifyTransform => Some(Stage::AwaitingApproval),
            Action::ConfirmUpload => Some(Stage::Uploading),
            Action::Start | Action::Unknown(_) => None,
        }
    }
}

impl From<String> for Action {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "start" => Action::Start,
            "provide_detail" => Action::ProvideDetail,
            "modify_transform" => Action::ModifyTransform,
            "confirm_upload" => Action::ConfirmUpload,
            _ => Action::Unknown(raw),
        }
    }
}

impl From<&str> for Action {
    fn from(raw: &str) -> Self {
        Action::from(raw.to_string())
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        match action {
            Action::Unknown(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the workflow needs from the caller next, derived from the stage alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredAction {
    ProvideDetail,
    AwaitTransform,
    ApproveTransform,
    ConfirmUpload,
    Complete,
}

impl RequiredAction {
    pub fn for_stage(stage: Stage) -> Self {
        match stage {
            Stage::Collecting => RequiredAction::ProvideDetail,
            Stage::Transforming => RequiredAction::AwaitTransform,
            Stage::AwaitingApproval => RequiredAction::ApproveTransform,
            Stage::Uploading => RequiredAction::ConfirmUpload,
            Stage::Complete => RequiredAction::Complete,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredAction::ProvideDetail => "provide_detail",
            RequiredAction::AwaitTransform => "await_transform",
            RequiredAction::ApproveTransform => "approve_transform",
            RequiredAction::ConfirmUpload => "confirm_upload",
            RequiredAction::Complete => "complete",
        }
    }
}

impl fmt::Display for RequiredAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of applying an action to a working state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action's effect (if any) was applied
    Accepted,
    /// The action did not match the stage; state untouched
    Ignored(String),
}

impl ActionOutcome {
    /// Soft warning to surface alongside the turn's response
    pub fn warning(&self) -> Option<&str> {
        match self {
            ActionOutcome::Accepted => None,
            ActionOutcome::Ignored(reason) => Some(reason.as_str()),
        }
    }
}

/// Apply `action` to `state` if the current stage accepts it.
///
/// `Start` is accepted without effect here; resetting happens when the engine
/// resolves the session.
pub fn apply_action(state: &mut WorkflowState, action: &Action, input: &str) -> ActionOutcome {
    match (action, state.stage) {
        (Action::Start, _) => ActionOutcome::Accepted,
        (Action::ProvideDetail, Stage::Collecting) if !state.details_complete() => {
            state.collected_details.push(input.to_string());
            state.detail_index += 1;
            ActionOutcome::Accepted
        }
        (Action::ModifyTransform, Stage::AwaitingApproval) => {
            if !input.is_empty() {
                state.transformed_output = Some(vec![input.to_string()]);
            }
            state.transform_approved = true;
            ActionOutcome::Accepted
        }
        (Action::ConfirmUpload, Stage::Uploading) => {
            state.upload_confirmed = true;
            ActionOutcome::Accepted
        }
        (Action::Unknown(raw), _) => {
            ActionOutcome::Ignored(format!("Unrecognised action '{}' ignored.", raw))
        }
        (action, stage) => ActionOutcome::Ignored(format!(
            "Action '{}' is not accepted while the workflow is {}; expected '{}'.",
            action,
            stage,
            RequiredAction::for_stage(stage)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(stage: Stage) -> WorkflowState {
        WorkflowState {
            stage,
            ..WorkflowState::initial()
        }
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!(Action::from("start"), Action::Start);
        assert_eq!(Action::from("provide_detail"), Action::ProvideDetail);
        assert_eq!(Action::from("modify_transform"), Action::ModifyTransform);
        assert_eq!(Action::from("confirm_upload"), Action::ConfirmUpload);
        assert_eq!(Action::from("dance"), Action::Unknown("dance".to_string()));
    }

    #[test]
    fn test_action_serde_accepts_any_string() {
        let action: Action = serde_json::from_str("\"confirm_upload\"").unwrap();
        assert_eq!(action, Action::ConfirmUpload);

        let unknown: Action = serde_json::from_str("\"approve\"").unwrap();
        assert_eq!(unknown, Action::Unknown("approve".to_string()));
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"approve\"");
    }

    #[test]
    fn test_required_action_mapping() {
        let expected = [
            (Stage::Collecting, "provide_detail"),
            (Stage::Transforming, "await_transform"),
            (Stage::AwaitingApproval, "approve_transform"),
            (Stage::Uploading, "confirm_upload"),
            (Stage::Complete, "complete"),
        ];
        for (stage, name) in expected {
            let required = RequiredAction::for_stage(stage);
            assert_eq!(required.as_str(), name);
            assert_eq!(serde_json::to_value(required).unwrap(), name);
        }
    }

    #[test]
    fn test_each_action_accepted_only_in_its_stage() {
        let actions = [Action::ProvideDetail, Action::ModifyTransform, Action::ConfirmUpload];
        for action in &actions {
            for stage in Stage::ALL {
                let mut state = state_at(stage);
                let before = state.clone();
                let outcome = apply_action(&mut state, action, "x");

                if action.accepted_in() == Some(stage) {
                    assert_eq!(outcome, ActionOutcome::Accepted, "{action} in {stage}");
                } else {
                    assert!(outcome.warning().is_some(), "{action} in {stage}");
                    assert_eq!(state, before, "{action} in {stage} must not mutate");
                }
            }
        }
    }

    #[test]
    fn test_provide_detail_appends() {
        let mut state = WorkflowState::initial();
        apply_action(&mut state, &Action::ProvideDetail, "first");
        apply_action(&mut state, &Action::ProvideDetail, "second");

        assert_eq!(state.collected_details, vec!["first", "second"]);
        assert_eq!(state.detail_index, 2);
    }

    #[test]
    fn test_provide_detail_bounded() {
        let mut state = WorkflowState::initial();
        for i in 0..hil_checkpoint::REQUIRED_DETAILS {
            apply_action(&mut state, &Action::ProvideDetail, &i.to_string());
        }
        let outcome = apply_action(&mut state, &Action::ProvideDetail, "extra");

        assert!(outcome.warning().is_some());
        assert_eq!(state.detail_index, hil_checkpoint::REQUIRED_DETAILS);
    }

    #[test]
    fn test_modify_transform_with_empty_input_keeps_output() {
        let mut state = state_at(Stage::AwaitingApproval);
        state.transformed_output = Some(vec!["derived".to_string()]);

        apply_action(&mut state, &Action::ModifyTransform, "");

        assert!(state.transform_approved);
        assert_eq!(state.transformed_output, Some(vec!["derived".to_string()]));
    }

    #[test]
    fn test_modify_transform_with_input_overrides_output() {
        let mut state = state_at(Stage::AwaitingApproval);
        state.transformed_output = Some(vec!["derived".to_string()]);

        apply_action(&mut state, &Action::ModifyTransform, "human edit");

        assert!(state.transform_approved);
        assert_eq!(state.transformed_output, Some(vec!["human edit".to_string()]));
    }

    #[test]
    fn test_unknown_action_warns() {
        let mut state = WorkflowState::initial();
        let outcome = apply_action(&mut state, &Action::from("approve"), "");
        assert_eq!(outcome.warning(), Some("Unrecognised action 'approve' ignored."));
        assert_eq!(state, WorkflowState::initial());
    }

    #[test]
    fn test_start_has_no_effect_here() {
        let mut state = state_at(Stage::Uploading);
        let before = state.clone();
        assert_eq!(apply_action(&mut state, &Action::Start, "x"), ActionOutcome::Accepted);
        assert_eq!(state, before);
    }
}
