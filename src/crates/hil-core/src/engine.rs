//! Turn processing
//!
//! [`WorkflowEngine::advance`] runs one turn against one session:
//!
//! ```text
//!   lock(session) ─▶ resolve ─▶ apply action ─▶ evaluate ─▶ put ─▶ respond
//!        │             │             │              │          │
//!        │      start/missing:       │        pure table,      │
//!        │      initial state        │      transform once     │
//!        └──────── held until the state is persisted ──────────┘
//! ```
//!
//! Evaluation keeps stepping only through transient stages and stops on the
//! first self-loop or on entering a stage that waits for the human. Four
//! details therefore take a session from `COLLECTING` straight to
//! `AWAITING_APPROVAL`, and the approval stage's own self-loop runs on the
//! following turn.
//!
//! All work happens on a copy of the stored state, including a reset on
//! `start` and the creation of an unknown session, and the final `put` is the
//! turn's only write. If the transform or the store fails, the copy is
//! dropped and the stored state is exactly what it was before the turn.

use std::sync::Arc;
use std::time::Duration;

use hil_checkpoint::{ensure_session_id, EvictionPolicy, SessionStore, Stage, WorkflowState};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::action::{apply_action, Action, ActionOutcome, RequiredAction};
use crate::error::{Result, WorkflowError};
use crate::locks::SessionLocks;
use crate::transform::{TemplateTransformer, Transformer};
use crate::transition::{approval_prompt, evaluate, Transition};

/// Engine tuning
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Upper bound for a single transformer call. `None` waits indefinitely.
    pub transform_timeout: Option<Duration>,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transform_timeout(mut self, timeout: Duration) -> Self {
        self.transform_timeout = Some(timeout);
        self
    }
}

/// Response to a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    /// Latest status or prompt
    pub message: String,

    /// What the caller must send next
    pub required_action: RequiredAction,

    /// The session's state after the turn
    pub current_state: WorkflowState,

    /// Set when the turn's action was ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl TurnOutcome {
    pub fn from_state(state: WorkflowState) -> Self {
        Self {
            message: state.message.clone(),
            required_action: RequiredAction::for_stage(state.stage),
            current_state: state,
            warning: None,
        }
    }

    pub fn with_warning(mut self, warning: Option<String>) -> Self {
        self.warning = warning;
        self
    }
}

/// The human-in-the-loop workflow state machine
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use hil_checkpoint::{InMemorySessionStore, Stage};
/// use hil_core::{Action, RequiredAction, WorkflowEngine};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let engine = WorkflowEngine::new(Arc::new(InMemorySessionStore::new()));
///
///     engine.advance("demo", "", Action::Start).await?;
///     for detail in ["a", "b", "c", "d"] {
///         engine.advance("demo", detail, Action::ProvideDetail).await?;
///     }
///
///     let turn = engine.advance("demo", "", Action::ModifyTransform).await?;
///     assert_eq!(turn.current_state.stage, Stage::Uploading);
///     assert_eq!(turn.required_action, RequiredAction::ConfirmUpload);
///     Ok(())
/// }
/// ```
pub struct WorkflowEngine {
    store: Arc<dyn SessionStore>,
    transformer: Arc<dyn Transformer>,
    locks: SessionLocks,
    config: EngineConfig,
}

impl WorkflowEngine {
    /// Create an engine over `store` with the template transformer
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            transformer: Arc::new(TemplateTransformer),
            locks: SessionLocks::new(),
            config: EngineConfig::default(),
        }
    }

    pub fn with_transformer(mut self, transformer: Arc<dyn Transformer>) -> Self {
        self.transformer = transformer;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Process one turn for `session_id`.
    ///
    /// Mismatched or unrecognised actions leave the state as it was and set
    /// [`TurnOutcome::warning`]. Unknown sessions are created on the fly.
    pub async fn advance(&self, session_id: &str, input: &str, action: Action) -> Result<TurnOutcome> {
        ensure_session_id(session_id)?;
        let _turn = self.locks.acquire(session_id).await;

        let (mut state, started) = self.resolve(session_id, &action).await?;
        let entered = state.stage;

        let outcome = apply_action(&mut state, &action, input);
        if let ActionOutcome::Ignored(reason) = &outcome {
            debug!(session_id, %action, stage = %entered, "{}", reason);
        }

        self.run_until_pause(session_id, &mut state).await?;

        if let Err(e) = self.store.put(session_id, state.clone()).await {
            error!(session_id, error = %e, "Failed to persist workflow state");
            return Err(e.into());
        }

        if started {
            info!(session_id, %action, "Workflow session started");
        }
        if state.stage != entered {
            info!(session_id, from = %entered, to = %state.stage, "Workflow stage advanced");
            if state.is_complete() {
                info!(session_id, details = state.collected_details.len(), "Workflow completed");
            }
        }

        let warning = outcome.warning().map(str::to_string);
        Ok(TurnOutcome::from_state(state).with_warning(warning))
    }

    /// Current state of a session without touching it
    pub async fn snapshot(&self, session_id: &str) -> Result<Option<TurnOutcome>> {
        Ok(self.store.get(session_id).await?.map(TurnOutcome::from_state))
    }

    /// Identifiers of all active sessions
    pub async fn sessions(&self) -> Result<Vec<String>> {
        Ok(self.store.list().await?)
    }

    /// Evict sessions selected by `policy` and forget their turn locks
    pub async fn evict(&self, policy: &dyn EvictionPolicy) -> Result<Vec<String>> {
        let evicted = self.store.evict(policy).await?;
        if !evicted.is_empty() {
            let pruned = self.locks.prune().await;
            info!(count = evicted.len(), pruned_locks = pruned, "Evicted idle sessions");
        }
        Ok(evicted)
    }

    /// Working copy for this turn, and whether it is a fresh session.
    ///
    /// Nothing is written here; the single `put` at the end of the turn is
    /// the only store write.
    async fn resolve(&self, session_id: &str, action: &Action) -> Result<(WorkflowState, bool)> {
        if *action != Action::Start {
            if let Some(state) = self.store.get(session_id).await? {
                return Ok((state, false));
            }
        }
        Ok((WorkflowState::initial(), true))
    }

    async fn run_until_pause(&self, session_id: &str, state: &mut WorkflowState) -> Result<()> {
        loop {
            match evaluate(state) {
                Transition::Stay { message } => {
                    state.message = message;
                    return Ok(());
                }
                Transition::Advance { next, message } => {
                    debug_assert!(next > state.stage, "{} -> {}", state.stage, next);
                    state.stage = next;
                    state.message = message;
                    if next.is_pause() {
                        return Ok(());
                    }
                }
                Transition::DeriveOutput => {
                    let output = match &state.transformed_output {
                        Some(existing) => existing.clone(),
                        None => self.derive_output(session_id, &state.collected_details).await?,
                    };
                    state.message = approval_prompt(&output);
                    state.transformed_output = Some(output);
                    state.stage = Stage::AwaitingApproval;
                    return Ok(());
                }
            }
        }
    }

    async fn derive_output(&self, session_id: &str, details: &[String]) -> Result<Vec<String>> {
        let call = self.transformer.transform(details);
        let result = match self.config.transform_timeout {
            Some(after) => tokio::time::timeout(after, call)
                .await
                .map_err(|_| WorkflowError::TransformTimeout { after })?,
            None => call.await,
        };

        result.map_err(|e| {
            error!(session_id, error = %e, "Transform failed");
            WorkflowError::from(e)
        })
    }
}
