//! # hil-checkpoint - Session State Persistence for the HIL Workflow
//!
//! **Trait-based session storage** for the human-in-the-loop workflow engine.
//! Every session owns exactly one [`WorkflowState`]; this crate defines that
//! record, the [`SessionStore`] interface the engine persists it through, and
//! the [`InMemorySessionStore`] reference implementation.
//!
//! ## Overview
//!
//! The workflow pauses between turns while a human decides what to do next.
//! Between those turns the session's progress lives here:
//!
//! - **Create / reset** - new sessions start from [`WorkflowState::initial`]
//! - **Get** - load the state a turn starts from
//! - **Put** - replace it with the state the turn ended in
//! - **List / remove / evict** - housekeeping for hosts
//!
//! ## Quick Start
//!
//! ```rust
//! use hil_checkpoint::{InMemorySessionStore, SessionStore, Stage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemorySessionStore::new();
//!
//!     let mut state = store.create_or_reset("session-42").await?;
//!     state.collected_details.push("first".to_string());
//!     state.detail_index += 1;
//!     store.put("session-42", state).await?;
//!
//!     let loaded = store.get("session-42").await?.expect("stored above");
//!     assert_eq!(loaded.detail_index, 1);
//!     assert_eq!(loaded.stage, Stage::Collecting);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        hil-core (WorkflowEngine)         │
//! │  resolve → apply → evaluate → persist    │
//! └───────────────────┬─────────────────────┘
//!                     │ get / create_or_reset / put
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │      SessionStore trait (this crate)     │
//! └───────────────────┬─────────────────────┘
//!            ┌────────┴─────────┐
//!            ▼                  ▼
//!   ┌────────────────┐   ┌──────────────┐
//!   │   In-Memory    │   │    Custom    │
//!   │  (reference)   │   │   backends   │
//!   └────────────────┘   └──────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`state`] - [`WorkflowState`], [`Stage`], [`REQUIRED_DETAILS`]
//! - [`traits`] - [`SessionStore`]
//! - [`memory`] - [`InMemorySessionStore`]
//! - [`eviction`] - [`EvictionPolicy`], [`IdleTimeout`], [`NeverEvict`]
//! - [`error`] - [`StoreError`]

pub mod error;
pub mod eviction;
pub mod memory;
pub mod state;
pub mod traits;

// Re-export main types
pub use error::{Result, StoreError};
pub use eviction::{EvictionPolicy, IdleTimeout, NeverEvict, SessionMeta};
pub use memory::InMemorySessionStore;
pub use state::{detail_prompt, Stage, WorkflowState, REQUIRED_DETAILS};
pub use traits::{ensure_session_id, SessionStore};
