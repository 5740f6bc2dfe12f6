//! TTL Cleanup Task
//!
//! Background task that periodically removes expired entries from the
//! in-process store. Reads already skip expired entries; the sweep only
//! reclaims memory held by accounts nobody asks for again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically cleans up expired entries.
///
/// # Arguments
/// * `store` - shared in-process store, see [`crate::cache::MemoryBackend::store`]
/// * `cleanup_interval_secs` - Interval in seconds between cleanup runs
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
pub fn spawn_cleanup_task(
    store: Arc<RwLock<CacheStore>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut guard = store.write().await;
                let removed = guard.cleanup_expired();
                (removed, guard.len())
            };

            if removed > 0 {
                info!(
                    "TTL cleanup: removed {} expired entries, {} remaining",
                    removed, remaining
                );
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
