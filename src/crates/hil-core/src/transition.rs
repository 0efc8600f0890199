//! The stage transition table
//!
//! [`evaluate`] is a pure function of the post-action state: one match arm per
//! [`Stage`], each deciding whether the session stays where it is or moves on,
//! and with which message. It never calls out. The single step that needs
//! outside work, deriving the transformed output while leaving
//! `TRANSFORMING`, is returned as [`Transition::DeriveOutput`] for the engine
//! to carry out.
//!
//! | stage | condition | next |
//! |-------|-----------|------|
//! | COLLECTING | index ≥ 4 | TRANSFORMING |
//! | COLLECTING | index < 4 | COLLECTING |
//! | TRANSFORMING | not approved | AWAITING_APPROVAL (derive output) |
//! | TRANSFORMING | approved | UPLOADING |
//! | AWAITING_APPROVAL | not approved | AWAITING_APPROVAL |
//! | AWAITING_APPROVAL | approved | UPLOADING |
//! | UPLOADING | not confirmed | UPLOADING |
//! | UPLOADING | confirmed | COMPLETE |
//! | COMPLETE | | COMPLETE |

use hil_checkpoint::{detail_prompt, Stage, WorkflowState};

pub const DETAILS_COLLECTED: &str = "All details collected. Moving to transformation.";
pub const AWAITING_APPROVAL: &str = "Awaiting approval of transformation.";
pub const TRANSFORM_APPROVED: &str = "Transform approved. Moving to upload.";
pub const READY_TO_UPLOAD: &str = "Ready to upload. Confirm?";
pub const UPLOAD_COMPLETE: &str = "Upload complete. Workflow finished.";
pub const WORKFLOW_COMPLETE: &str = "Workflow complete.";

/// Outcome of evaluating one stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Self-loop: the stage is unchanged, only the message is refreshed
    Stay { message: String },
    /// Move on to `next`
    Advance { next: Stage, message: String },
    /// Derive `transformedOutput` and move to `AWAITING_APPROVAL`
    DeriveOutput,
}

impl Transition {
    fn stay(message: impl Into<String>) -> Self {
        Transition::Stay {
            message: message.into(),
        }
    }

    fn advance(next: Stage, message: impl Into<String>) -> Self {
        Transition::Advance {
            next,
            message: message.into(),
        }
    }
}

/// Decide the next stage for `state`
pub fn evaluate(state: &WorkflowState) -> Transition {
    match state.stage {
        Stage::Collecting => {
            if state.details_complete() {
                Transition::advance(Stage::Transforming, DETAILS_COLLECTED)
            } else {
                Transition::stay(detail_prompt(state.detail_index))
            }
        }
        Stage::Transforming => {
            if state.transform_approved {
                Transition::advance(Stage::Uploading, TRANSFORM_APPROVED)
            } else {
                Transition::DeriveOutput
            }
        }
        Stage::AwaitingApproval => {
            if state.transform_approved {
                Transition::advance(Stage::Uploading, TRANSFORM_APPROVED)
            } else {
                Transition::stay(AWAITING_APPROVAL)
            }
        }
        Stage::Uploading => {
            if state.upload_confirmed {
                Transition::advance(Stage::Complete, UPLOAD_COMPLETE)
            } else {
                Transition::stay(READY_TO_UPLOAD)
            }
        }
        Stage::Complete => Transition::stay(WORKFLOW_COMPLETE),
    }
}

/// Message shown once the output has been derived
pub fn approval_prompt(output: &[String]) -> String {
    format!("Data transformed. Result: {}. Do you approve?", output.join(" | "))
}
