//! Cache TTL Sweep Task
//!
//! Background task that periodically drops expired entities from the
//! datastore's LRU cache.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::LruEntityCache;

/// Spawns a task that drops expired cache entries every `interval_secs`.
///
/// Lookups already ignore expired entries; the sweep only reclaims their
/// memory. Abort the returned handle on shutdown.
pub fn spawn_cache_sweep_task(cache: Arc<LruEntityCache>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache sweep task with interval of {} seconds",
            interval.as_secs()
        );

        let mut ticker = tokio::time::interval(interval);
        // the first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = cache.cleanup_expired();
            if removed > 0 {
                info!("Cache sweep: removed {} expired entities", removed);
            } else {
                debug!("Cache sweep: no expired entities found");
            }
        }
    })
}
