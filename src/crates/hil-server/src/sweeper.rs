//! Background eviction of idle sessions
//!
//! Runs [`WorkflowEngine::evict`] on a fixed interval. Only started when an
//! idle TTL is configured; otherwise sessions live as long as the process.

use std::sync::Arc;
use std::time::Duration;

use hil_checkpoint::EvictionPolicy;
use hil_core::WorkflowEngine;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Run one sweep. Returns the number of evicted sessions; failures are logged
/// and count as zero so the next tick retries.
pub async fn sweep_once(engine: &WorkflowEngine, policy: &dyn EvictionPolicy) -> usize {
    match engine.evict(policy).await {
        Ok(evicted) => {
            for session_id in &evicted {
                tracing::debug!(session_id = %session_id, "Session evicted");
            }
            evicted.len()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Session sweep failed");
            0
        }
    }
}

/// Spawn the sweeper task. Abort the handle to stop it.
pub fn spawn_sweeper<P>(engine: Arc<WorkflowEngine>, policy: P, every: Duration) -> JoinHandle<()>
where
    P: EvictionPolicy + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            sweep_once(&engine, &policy).await;
        }
    })
}
