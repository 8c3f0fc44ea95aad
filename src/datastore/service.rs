//! Datastore Service
//!
//! Cache-aside access to the storage port, prefix queries, and token
//! substitution, all behind the health gate.

use std::borrow::Cow;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

use super::health::HealthGate;
use super::stats::{DatastoreStats, StatsSnapshot};
use super::template;
use crate::cache::{CacheStats, EntityCache};
use crate::error::{StorageError, StorageResult};
use crate::storage::{DataEntity, Storage};

/// Stored value of a true flag.
pub const VALUE_TRUE: &str = "true";
/// Stored value of a false flag.
pub const VALUE_FALSE: &str = "false";
/// Substituted for tokens whose key cannot be resolved.
pub const VALUE_MISSING: &str = "DS Value Missing";

// == Datastore Service ==
/// Shared key/value configuration store.
///
/// Reads go through the bound cache when there is one; writes and deletes
/// hit storage and then invalidate the cached copy. The first
/// `StorageError::Unavailable` disables the service for good: reads then
/// return their fallback and writes are dropped, without touching storage
/// or cache.
///
/// Safe to share between threads, usually as `Arc<DatastoreService>`.
pub struct DatastoreService {
    storage: Arc<dyn Storage>,
    cache: RwLock<Option<Arc<dyn EntityCache>>>,
    gate: HealthGate,
    stats: DatastoreStats,
}

impl DatastoreService {
    // == Constructors ==
    /// Creates a service without a cache.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            cache: RwLock::new(None),
            gate: HealthGate::new(),
            stats: DatastoreStats::new(),
        }
    }

    /// Creates a service with `cache` bound from the start.
    pub fn with_cache(storage: Arc<dyn Storage>, cache: Arc<dyn EntityCache>) -> Self {
        let service = Self::new(storage);
        *service.cache.write() = Some(cache);
        service
    }

    // == Cache Binding ==
    /// Binds the cache once the rest of the application is up.
    ///
    /// Used when the cache itself is configured through this datastore and
    /// so cannot exist when the service is created. Binding again replaces
    /// the previous cache.
    pub fn bind_cache(&self, cache: Arc<dyn EntityCache>) {
        let previous = self.cache.write().replace(cache);
        if previous.is_some() {
            warn!("Datastore's cache replaced");
        } else {
            info!("Datastore's cache started.");
        }
    }

    /// Returns true if a cache is bound.
    pub fn has_cache(&self) -> bool {
        self.cache.read().is_some()
    }

    fn bound_cache(&self) -> Option<Arc<dyn EntityCache>> {
        self.cache.read().clone()
    }

    // == Health ==
    /// Returns true while storage access is allowed.
    pub fn is_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    /// Returns the counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Returns the bound cache's counters, if it keeps any.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.bound_cache().and_then(|cache| cache.stats())
    }

    /// Runs `op` if the gate is open, converting failures into `None`.
    ///
    /// Unavailable storage disables the gate; other storage errors are
    /// logged and leave the gate alone.
    fn guarded<T>(&self, operation: &str, op: impl FnOnce() -> StorageResult<T>) -> Option<T> {
        if !self.gate.is_enabled() {
            return None;
        }

        match op() {
            Ok(value) => Some(value),
            Err(err) if err.is_unavailable() => {
                self.stats.record_disable_event();
                self.gate.disable(&err);
                None
            }
            Err(err) => {
                warn!(operation, error = %err, "Datastore operation failed");
                None
            }
        }
    }

    // == Lookup ==
    fn lookup(&self, key: &str, populate_cache: bool) -> StorageResult<Option<DataEntity>> {
        let cache = self.bound_cache();

        if let Some(cache) = &cache {
            if let Some(entity) = cache.get(key) {
                self.stats.record_cache_hit();
                return Ok(Some(entity));
            }
            self.stats.record_cache_miss();
        }

        self.stats.record_storage_read();
        let Some(entity) = self.storage.find_by_key(key)? else {
            return Ok(None);
        };

        if populate_cache {
            if let Some(cache) = &cache {
                cache.put(key, entity.clone());
            }
        }
        Ok(Some(entity))
    }

    // == Get ==
    /// Returns the value stored under `key`, or None.
    pub fn find_value(&self, key: &str) -> Option<String> {
        self.guarded("get", || self.lookup(key, true))
            .flatten()
            .map(|entity| entity.value)
    }

    /// Returns the value stored under `key`, or `default`.
    pub fn get_value(&self, key: &str, default: &str) -> String {
        self.find_value(key).unwrap_or_else(|| default.to_string())
    }

    /// Reads a flag stored as `"true"` / `"false"`.
    ///
    /// Any stored value other than `"true"` reads as false.
    pub fn get_flag(&self, key: &str, default: bool) -> bool {
        self.find_value(key)
            .map_or(default, |value| value == VALUE_TRUE)
    }

    // == Exists ==
    /// Returns true if `key` is stored. Does not populate the cache.
    pub fn key_exists(&self, key: &str) -> bool {
        self.guarded("exists", || self.lookup(key, false))
            .flatten()
            .is_some()
    }

    // == Set ==
    /// Stores `value` under `key`, creating or replacing the entity.
    pub fn set_value(&self, key: &str, value: &str) {
        self.guarded("set", || {
            let entity = DataEntity::new(key, value);
            self.stats.record_storage_read();
            let existing = self.storage.find_by_key(key)?;

            self.stats.record_storage_write();
            if existing.is_some() {
                self.overwrite(&entity)?;
            } else {
                match self.storage.create(&entity) {
                    // another writer created the key since the lookup
                    Err(StorageError::Duplicate(_)) => {
                        debug!(key, "Datastore create raced, updating instead");
                        self.overwrite(&entity)?;
                    }
                    result => result?,
                }
            }
            debug!(key, "Datastore value set");
            Ok(())
        });
    }

    /// Updates a stored entity; the next read refetches it from storage.
    fn overwrite(&self, entity: &DataEntity) -> StorageResult<()> {
        self.storage.update(entity)?;
        if let Some(cache) = self.bound_cache() {
            cache.invalidate(&entity.key);
        }
        Ok(())
    }

    /// Stores a flag as `"true"` / `"false"`.
    pub fn set_flag(&self, key: &str, value: bool) {
        self.set_value(key, if value { VALUE_TRUE } else { VALUE_FALSE });
    }

    // == Remove ==
    /// Deletes `key`. Deleting an absent key does nothing.
    pub fn remove_value(&self, key: &str) {
        self.guarded("remove", || {
            self.stats.record_storage_write();
            self.storage.remove(key)?;
            if let Some(cache) = self.bound_cache() {
                cache.invalidate(key);
            }
            debug!(key, "Datastore value removed");
            Ok(())
        });
    }

    // == Prefix Queries ==
    /// Returns every entity whose key starts with `prefix`, in storage order.
    pub fn get_by_prefix(&self, prefix: &str) -> Vec<DataEntity> {
        self.guarded("get_by_prefix", || {
            self.stats.record_storage_read();
            Ok(self
                .storage
                .find_all()?
                .into_iter()
                .filter(|entity| entity.key.starts_with(prefix))
                .collect())
        })
        .unwrap_or_default()
    }

    /// Deletes every entity whose key starts with `prefix`.
    ///
    /// Each key goes through `remove_value`. Not atomic: if storage fails
    /// partway, keys already removed stay removed and the rest are left.
    pub fn remove_by_prefix(&self, prefix: &str) {
        let keys = self
            .guarded("remove_by_prefix", || {
                self.stats.record_storage_read();
                Ok(self
                    .storage
                    .find_all()?
                    .into_iter()
                    .filter(|entity| entity.key.starts_with(prefix))
                    .map(|entity| entity.key)
                    .collect::<Vec<_>>())
            })
            .unwrap_or_default();

        for key in &keys {
            self.remove_value(key);
        }
        debug!(prefix, count = keys.len(), "Datastore prefix removed");
    }

    // == Token Substitution ==
    /// Replaces each `#dskey{key}` token in `text` with the stored value.
    ///
    /// Unresolvable keys become [`VALUE_MISSING`] and are logged. Text
    /// without tokens is returned borrowed.
    pub fn replace_keys<'a>(&self, text: &'a str) -> Cow<'a, str> {
        template::render(text, |key| {
            let value = self.get_value(key, VALUE_MISSING);
            if value == VALUE_MISSING {
                self.stats.record_missing_key();
                error!(
                    "Datastore Key missing : {} - Please fix to avoid performance issues.",
                    key
                );
            }
            value
        })
    }

    /// `replace_keys` for optional text; None passes through.
    pub fn replace_keys_opt<'a>(&self, text: Option<&'a str>) -> Option<Cow<'a, str>> {
        text.map(|text| self.replace_keys(text))
    }
}

impl std::fmt::Debug for DatastoreService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatastoreService")
            .field("enabled", &self.gate.is_enabled())
            .field("has_cache", &self.has_cache())
            .field("stats", &self.stats.snapshot())
            .finish()
    }
}
