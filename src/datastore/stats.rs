//! Datastore counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Datastore Stats ==
/// Lock-free counters updated by `DatastoreService`.
#[derive(Debug, Default)]
pub struct DatastoreStats {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    storage_reads: AtomicU64,
    storage_writes: AtomicU64,
    missing_keys: AtomicU64,
    disable_events: AtomicU64,
}

/// Point-in-time copy of `DatastoreStats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub storage_reads: u64,
    pub storage_writes: u64,
    /// Template tokens that resolved to the missing-value sentinel
    pub missing_keys: u64,
    /// Storage failures that hit the health gate
    pub disable_events: u64,
}

impl DatastoreStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_storage_read(&self) {
        self.storage_reads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_storage_write(&self) {
        self.storage_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_missing_key(&self) {
        self.missing_keys.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_disable_event(&self) {
        self.disable_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            storage_reads: self.storage_reads.load(Ordering::Relaxed),
            storage_writes: self.storage_writes.load(Ordering::Relaxed),
            missing_keys: self.missing_keys.load(Ordering::Relaxed),
            disable_events: self.disable_events.load(Ordering::Relaxed),
        }
    }
}
