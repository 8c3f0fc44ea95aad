//! Cache Module
//!
//! The cache port the datastore shadows entities into, and the bounded
//! LRU/TTL implementation started by the server.

mod entry;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

use std::time::Duration;

use parking_lot::Mutex;

pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

use crate::storage::DataEntity;

// == Cache Port ==
/// A pluggable, thread-safe entity cache.
///
/// The cache is a performance shadow only; the datastore never treats it as
/// authoritative and invalidates entries rather than updating them.
pub trait EntityCache: Send + Sync {
    /// Returns the cached entity for `key`, if any.
    fn get(&self, key: &str) -> Option<DataEntity>;

    /// Caches `entity` under `key`.
    fn put(&self, key: &str, entity: DataEntity);

    /// Drops the cached entity for `key`, if any.
    fn invalidate(&self, key: &str);

    /// Counters for diagnostics, when the implementation keeps them.
    fn stats(&self) -> Option<CacheStats> {
        None
    }
}

// == LRU Entity Cache ==
/// `CacheStore` behind a mutex.
#[derive(Debug)]
pub struct LruEntityCache {
    store: Mutex<CacheStore>,
}

impl LruEntityCache {
    /// Creates a cache holding at most `max_entries` entities for `ttl` each.
    pub fn new(max_entries: usize, ttl: Option<Duration>) -> Self {
        Self {
            store: Mutex::new(CacheStore::new(max_entries, ttl)),
        }
    }

    /// Drops expired entries, returning how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        self.store.lock().cleanup_expired()
    }

    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }
}

impl EntityCache for LruEntityCache {
    fn get(&self, key: &str) -> Option<DataEntity> {
        self.store.lock().get(key)
    }

    fn put(&self, key: &str, entity: DataEntity) {
        self.store.lock().put(key.to_string(), entity);
    }

    fn invalidate(&self, key: &str) {
        self.store.lock().invalidate(key);
    }

    fn stats(&self) -> Option<CacheStats> {
        Some(self.store.lock().stats())
    }
}
