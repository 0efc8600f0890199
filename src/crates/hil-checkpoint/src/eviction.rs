//! Eviction policies for stored sessions
//!
//! Sessions live until the process exits unless a host asks the store to
//! [`evict`](crate::SessionStore::evict) them. The policy only decides; the
//! store does the removal.

use chrono::{DateTime, Duration, Utc};

use crate::state::Stage;

/// What a policy gets to see about a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMeta {
    pub session_id: String,
    pub stage: Stage,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionMeta {
    /// Time since the last write at `now`
    pub fn idle_for(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.updated_at)
    }
}

/// Decides which sessions a store should drop
pub trait EvictionPolicy: Send + Sync {
    fn should_evict(&self, meta: &SessionMeta, now: DateTime<Utc>) -> bool;
}

/// Evict sessions that have not been written for longer than `max_idle`
///
/// Finished sessions can be given a shorter limit with
/// [`with_completed_ttl`](IdleTimeout::with_completed_ttl).
#[derive(Debug, Clone, Copy)]
pub struct IdleTimeout {
    max_idle: Duration,
    completed_max_idle: Option<Duration>,
}

impl IdleTimeout {
    pub fn new(max_idle: Duration) -> Self {
        Self {
            max_idle,
            completed_max_idle: None,
        }
    }

    /// Convenience constructor for config values expressed in seconds
    pub fn from_secs(secs: u64) -> Self {
        Self::new(secs_to_duration(secs))
    }

    /// Limit applied to sessions in a terminal stage instead of `max_idle`
    pub fn with_completed_ttl(mut self, max_idle: Duration) -> Self {
        self.completed_max_idle = Some(max_idle);
        self
    }

    pub fn with_completed_secs(self, secs: u64) -> Self {
        self.with_completed_ttl(secs_to_duration(secs))
    }

    pub fn max_idle(&self) -> Duration {
        self.max_idle
    }

    /// The limit that applies to a session in `stage`
    pub fn limit_for(&self, stage: Stage) -> Duration {
        match self.completed_max_idle {
            Some(limit) if stage.is_terminal() => limit,
            _ => self.max_idle,
        }
    }
}

impl EvictionPolicy for IdleTimeout {
    fn should_evict(&self, meta: &SessionMeta, now: DateTime<Utc>) -> bool {
        meta.idle_for(now) > self.limit_for(meta.stage)
    }
}

fn secs_to_duration(secs: u64) -> Duration {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or_else(Duration::max_value)
}

/// Keep everything (the volatile-memory default)
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverEvict;

impl EvictionPolicy for NeverEvict {
    fn should_evict(&self, _meta: &SessionMeta, _now: DateTime<Utc>) -> bool {
        false
    }
}
