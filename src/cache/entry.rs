//! Cache Entry Module
//!
//! A cached shadow of a stored entity, with an optional expiry deadline.

use std::time::{Duration, Instant};

use crate::storage::DataEntity;

// == Cache Entry ==
/// A cached copy of a `DataEntity`.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached entity
    pub entity: DataEntity,
    /// Deadline after which the entry is stale, None = never
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry, expiring `ttl` from now when given.
    pub fn new(entity: DataEntity, ttl: Option<Duration>) -> Self {
        Self {
            entity,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired at `now`.
    ///
    /// An entry is expired once `now` reaches its deadline.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(deadline) if now >= deadline)
    }
}
