//! # hil-core - Human-in-the-Loop Workflow Engine
//!
//! A per-session finite-state machine that walks a fixed pipeline of stages,
//! pauses wherever it needs a human, and resumes from the persisted state on
//! the next turn.
//!
//! ```text
//!  COLLECTING ──▶ TRANSFORMING ──▶ AWAITING_APPROVAL ──▶ UPLOADING ──▶ COMPLETE
//!   ↺ detail #n                      ↺ approve?             ↺ confirm?
//!   (pause)       (transient)        (pause)                (pause)      (terminal)
//! ```
//!
//! ## Turns
//!
//! Every inbound request is one turn: a `(session_id, input, action)` triple.
//! [`WorkflowEngine::advance`] resolves the session (creating or resetting it
//! as needed), applies the action if the current stage accepts it, evaluates
//! the transition table until the workflow pauses again, persists the result
//! through a [`SessionStore`](hil_checkpoint::SessionStore), and answers with a
//! [`TurnOutcome`]: the message, the [`RequiredAction`] and the new state.
//!
//! ```rust
//! use std::sync::Arc;
//! use hil_checkpoint::{InMemorySessionStore, Stage};
//! use hil_core::{Action, RequiredAction, WorkflowEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = WorkflowEngine::new(Arc::new(InMemorySessionStore::new()));
//!
//!     for detail in ["a", "b", "c", "d"] {
//!         engine.advance("session-1", detail, Action::ProvideDetail).await?;
//!     }
//!
//!     let turn = engine.advance("session-1", "", Action::ModifyTransform).await?;
//!     assert_eq!(turn.required_action, RequiredAction::ConfirmUpload);
//!
//!     let turn = engine.advance("session-1", "", Action::ConfirmUpload).await?;
//!     assert_eq!(turn.current_state.stage, Stage::Complete);
//!     assert_eq!(turn.message, "Upload complete. Workflow finished.");
//!     Ok(())
//! }
//! ```
//!
//! ## Invalid input
//!
//! An action the current stage does not accept is a no-op: the turn still
//! succeeds, reflects the unchanged state and carries a
//! [`warning`](TurnOutcome::warning). Only infrastructure failures (store,
//! transformer) surface as [`WorkflowError`], and those never persist a
//! partial turn.
//!
//! ## Concurrency
//!
//! Turns on the same session are serialized by [`SessionLocks`]; different
//! sessions proceed independently.
//!
//! ## Module Organization
//!
//! - [`engine`] - [`WorkflowEngine`], [`EngineConfig`], [`TurnOutcome`]
//! - [`transition`] - the pure per-stage transition table
//! - [`action`] - [`Action`], [`RequiredAction`], [`apply_action`]
//! - [`transform`] - the [`Transformer`] seam and [`TemplateTransformer`]
//! - [`locks`] - [`SessionLocks`]
//! - [`error`] - [`WorkflowError`]

pub mod action;
pub mod engine;
pub mod error;
pub mod locks;
pub mod transform;
pub mod transition;

pub use action::{apply_action, Action, ActionOutcome, RequiredAction};
pub use engine::{EngineConfig, TurnOutcome, WorkflowEngine};
pub use error::{Result, WorkflowError};
pub use locks::SessionLocks;
pub use transform::{TemplateTransformer, TransformError, Transformer};
pub use transition::{evaluate, Transition};
