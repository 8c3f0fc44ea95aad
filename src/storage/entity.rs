//! Data Entity Module
//!
//! The key/value pair persisted by storage ports and shadowed by caches.

use serde::{Deserialize, Serialize};

// == Data Entity ==
/// A stored key/value pair. The key is unique within a storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEntity {
    /// Unique key
    pub key: String,
    /// Stored value
    pub value: String,
}

impl DataEntity {
    /// Creates a new entity.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<(String, String)> for DataEntity {
    fn from((key, value): (String, String)) -> Self {
        Self { key, value }
    }
}
