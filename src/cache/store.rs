//! Cache Store Module
//!
//! Bounded entity cache combining a HashMap with LRU tracking and TTL expiry.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::storage::DataEntity;

// == Cache Store ==
/// Bounded, single-threaded entity cache. `LruEntityCache` puts it behind a
/// lock to make it shareable.
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    lru: LruTracker,
    stats: CacheStats,
    max_entries: usize,
    ttl: Option<Duration>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store holding at most `max_entries` entities, each cached
    /// for `ttl` when given.
    pub fn new(max_entries: usize, ttl: Option<Duration>) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl,
        }
    }

    // == Get ==
    /// Returns the cached entity for `key`.
    ///
    /// Expired entries are dropped and counted as misses.
    pub fn get(&mut self, key: &str) -> Option<DataEntity> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.drop_entry(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.entity.clone())
    }

    // == Put ==
    /// Caches `entity` under `key`, evicting the least recently used entry
    /// when the store is full. A zero-capacity store caches nothing.
    pub fn put(&mut self, key: String, entity: DataEntity) {
        if self.max_entries == 0 {
            return;
        }

        if !self.entries.contains_key(&key) {
            while self.entries.len() >= self.max_entries {
                match self.lru.evict_oldest() {
                    Some(evicted) => {
                        self.entries.remove(&evicted);
                        self.stats.record_eviction();
                    }
                    None => break,
                }
            }
        }

        self.lru.touch(&key);
        self.entries.insert(key, CacheEntry::new(entity, self.ttl));
    }

    // == Invalidate ==
    /// Drops the entry for `key`. Returns true if one was cached.
    pub fn invalidate(&mut self, key: &str) -> bool {
        let removed = self.drop_entry(key);
        if removed {
            self.stats.record_invalidation();
        }
        removed
    }

    // == Cleanup Expired ==
    /// Drops every expired entry and returns how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.drop_entry(key);
        }
        self.stats.record_expirations(expired.len());
        expired.len()
    }

    // == Stats ==
    /// Returns a snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            ..self.stats.clone()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn drop_entry(&mut self, key: &str) -> bool {
        self.lru.remove(key);
        self.entries.remove(key).is_some()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn entity(key: &str, value: &str) -> DataEntity {
        DataEntity::new(key, value)
    }

    fn put(store: &mut CacheStore, key: &str, value: &str) {
        store.put(key.to_string(), entity(key, value));
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = CacheStore::new(100, None);

        put(&mut store, "key1", "value1");

        assert_eq!(store.get("key1"), Some(entity("key1", "value1")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_missing_counts_miss() {
        let mut store = CacheStore::new(100, None);

        assert_eq!(store.get("nonexistent"), None);
        assert_eq!(store.stats().misses, 1);
        assert_eq!(store.stats().hits, 0);
    }

    #[test]
    fn test_store_invalidate() {
        let mut store = CacheStore::new(100, None);

        put(&mut store, "key1", "value1");
        assert!(store.invalidate("key1"));
        assert!(!store.invalidate("key1"));

        assert!(store.is_empty());
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.stats().invalidations, 1);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = CacheStore::new(100, Some(Duration::from_millis(50)));

        put(&mut store, "key1", "value1");
        assert!(store.get("key1").is_some());

        sleep(Duration::from_millis(80));

        assert_eq!(store.get("key1"), None);
        assert!(store.is_empty());
        assert_eq!(store.stats().expirations, 1);
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = CacheStore::new(3, None);

        put(&mut store, "key1", "value1");
        put(&mut store, "key2", "value2");
        put(&mut store, "key3", "value3");
        store.get("key1");
        put(&mut store, "key4", "value4");

        assert_eq!(store.len(), 3);
        assert!(store.get("key1").is_some());
        assert_eq!(store.get("key2"), None);
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_overwrite_does_not_evict() {
        let mut store = CacheStore::new(2, None);

        put(&mut store, "key1", "value1");
        put(&mut store, "key2", "value2");
        put(&mut store, "key1", "value3");

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("key1").unwrap().value, "value3");
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_zero_capacity_caches_nothing() {
        let mut store = CacheStore::new(0, None);
        put(&mut store, "key1", "value1");
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = CacheStore::new(100, Some(Duration::from_millis(50)));

        put(&mut store, "key1", "value1");
        sleep(Duration::from_millis(80));
        put(&mut store, "key2", "value2");

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("key2").is_some());
    }
}
