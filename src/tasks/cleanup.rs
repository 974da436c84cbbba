//! TTL Cleanup Task
//!
//! Background task that periodically removes expired in-memory cache entries.
//! Redis expires keys on its own, so this only runs for the memory backend.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryCache;

/// Spawns a background task that periodically cleans up expired cache entries.
///
/// The task runs until aborted, sleeping for `cleanup_interval_secs` between
/// sweeps.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(MemoryCache::new());
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 1);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: Arc<MemoryCache>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup_expired().await;

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
