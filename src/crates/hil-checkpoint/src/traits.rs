//! The session store interface
//!
//! [`SessionStore`] is the only seam between the workflow engine and wherever
//! session state actually lives. The engine never touches storage any other
//! way, so swapping the in-memory map for a database means implementing this
//! trait and nothing else.
//!
//! # Contract
//!
//! | Method | Semantics |
//! |--------|-----------|
//! | [`get`](SessionStore::get) | `Ok(None)` when the session does not exist |
//! | [`create_or_reset`](SessionStore::create_or_reset) | stores and returns [`WorkflowState::initial`] |
//! | [`put`](SessionStore::put) | unconditional replace, all-or-nothing |
//! | [`list`](SessionStore::list) | ids of stored sessions, sorted |
//! | [`remove`](SessionStore::remove) | `Ok(true)` when something was removed |
//! | [`evict`](SessionStore::evict) | removes what the policy selects |
//!
//! A failed `put` must leave the previously stored state readable. The engine
//! relies on this to keep the store consistent with the responses it returns.
//!
//! # Implementing a backend
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use hil_checkpoint::{Result, SessionStore, StoreError, WorkflowState};
//!
//! struct RedisSessionStore { client: redis::Client }
//!
//! #[async_trait]
//! impl SessionStore for RedisSessionStore {
//!     async fn get(&self, session_id: &str) -> Result<Option<WorkflowState>> {
//!         let raw: Option<String> = self.fetch(session_id).await?;
//!         raw.map(|s| serde_json::from_str(&s).map_err(StoreError::from)).transpose()
//!     }
//!     // create_or_reset, put, list ...
//! }
//! ```

use async_trait::async_trait;

use crate::{
    error::{Result, StoreError},
    eviction::EvictionPolicy,
    state::WorkflowState,
};

/// Persistence backend for per-session workflow state
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the stored state for a session
    async fn get(&self, session_id: &str) -> Result<Option<WorkflowState>>;

    /// Replace (or create) the session with the canonical initial state and return it
    async fn create_or_reset(&self, session_id: &str) -> Result<WorkflowState>;

    /// Store `state` for the session, replacing whatever was there
    async fn put(&self, session_id: &str, state: WorkflowState) -> Result<()>;

    /// Identifiers of every stored session
    async fn list(&self) -> Result<Vec<String>>;

    /// Drop a session. Backends without teardown support may keep the default.
    async fn remove(&self, session_id: &str) -> Result<bool> {
        let _ = session_id;
        Ok(false)
    }

    /// Drop every session `policy` selects and return their ids.
    ///
    /// The default evicts nothing, matching the volatile-memory behaviour.
    async fn evict(&self, policy: &dyn EvictionPolicy) -> Result<Vec<String>> {
        let _ = policy;
        Ok(Vec::new())
    }
}

/// Reject identifiers no backend can key on
pub fn ensure_session_id(session_id: &str) -> Result<()> {
    if session_id.trim().is_empty() {
        return Err(StoreError::InvalidSessionId(session_id.to_string()));
    }
    Ok(())
}
