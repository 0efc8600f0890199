//! In-memory session storage
//!
//! [`InMemorySessionStore`] keeps every session in a `HashMap` behind a tokio
//! `RwLock`. It is the reference [`SessionStore`] and the one the server uses:
//! sessions last as long as the process, which is all the workflow needs.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  InMemorySessionStore                         │
//! │  Arc<RwLock<HashMap<String, SessionEntry>>>   │
//! │    "alice" ─▶ { state, created_at, updated_at }│
//! │    "bob"   ─▶ { state, created_at, updated_at }│
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Clones share the same map, so one store can be handed to the engine and to
//! a background sweeper.
//!
//! # Concurrency
//!
//! Each method takes the lock once, so individual calls are atomic. A
//! read-modify-write across `get` and `put` is not; serializing turns on one
//! session is the engine's job.

use crate::{
    error::Result,
    eviction::{EvictionPolicy, SessionMeta},
    state::WorkflowState,
    traits::{ensure_session_id, SessionStore},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Storage entry for one session
#[derive(Debug, Clone)]
struct SessionEntry {
    state: WorkflowState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SessionEntry {
    fn new(state: WorkflowState) -> Self {
        let now = Utc::now();
        Self {
            state,
            created_at: now,
            updated_at: now,
        }
    }

    fn meta(&self, session_id: &str) -> SessionMeta {
        SessionMeta {
            session_id: session_id.to_string(),
            stage: self.state.stage,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

type SessionMap = Arc<RwLock<HashMap<String, SessionEntry>>>;

/// Volatile, process-lifetime session store
///
/// # Example
///
/// ```rust
/// use hil_checkpoint::{InMemorySessionStore, SessionStore, Stage};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemorySessionStore::new();
///
///     let state = store.create_or_reset("session-1").await?;
///     assert_eq!(state.stage, Stage::Collecting);
///     assert!(store.get("session-1").await?.is_some());
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: SessionMap,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Metadata for a stored session
    pub async fn meta(&self, session_id: &str) -> Option<SessionMeta> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .map(|entry| entry.meta(session_id))
    }

    /// Drop every session (useful for testing)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<WorkflowState>> {
        ensure_session_id(session_id)?;
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).map(|entry| entry.state.clone()))
    }

    async fn create_or_reset(&self, session_id: &str) -> Result<WorkflowState> {
        ensure_session_id(session_id)?;
        let state = WorkflowState::initial();
        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id.to_string(), SessionEntry::new(state.clone()));
        Ok(state)
    }

    async fn put(&self, session_id: &str, state: WorkflowState) -> Result<()> {
        ensure_session_id(session_id)?;
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(session_id) {
            Some(entry) => {
                entry.state = state;
                entry.updated_at = Utc::now();
            }
            None => {
                sessions.insert(session_id.to_string(), SessionEntry::new(state));
            }
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>> {
        let mut ids: Vec<String> = self.sessions.read().await.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    async fn remove(&self, session_id: &str) -> Result<bool> {
        Ok(self.sessions.write().await.remove(session_id).is_some())
    }

    async fn evict(&self, policy: &dyn EvictionPolicy) -> Result<Vec<String>> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;

        let mut evicted: Vec<String> = sessions
            .iter()
            .filter(|(id, entry)| policy.should_evict(&entry.meta(id), now))
            .map(|(id, _)| id.clone())
            .collect();
        evicted.sort();

        for id in &evicted {
            sessions.remove(id);
        }

        Ok(evicted)
    }
}
