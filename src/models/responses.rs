//! Response DTOs for the datastore API

use serde::Serialize;

use crate::cache::CacheStats;
use crate::datastore::StatsSnapshot;
use crate::storage::DataEntity;

/// Response body for `GET /data/:key`
#[derive(Debug, Clone, Serialize)]
pub struct ValueResponse {
    pub key: String,
    pub value: String,
}

impl ValueResponse {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for `PUT /data`
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    pub message: String,
    pub key: String,
}

impl SetResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set", key),
            key,
        }
    }
}

/// Response body for the delete endpoints
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub fn key(key: &str) -> Self {
        Self {
            message: format!("Key '{}' removed", key),
        }
    }

    pub fn prefix(prefix: &str) -> Self {
        Self {
            message: format!("Keys with prefix '{}' removed", prefix),
        }
    }
}

/// Response body for `GET /data?prefix=`
#[derive(Debug, Clone, Serialize)]
pub struct EntriesResponse {
    pub prefix: String,
    pub count: usize,
    pub entries: Vec<DataEntity>,
}

impl EntriesResponse {
    pub fn new(prefix: impl Into<String>, entries: Vec<DataEntity>) -> Self {
        Self {
            prefix: prefix.into(),
            count: entries.len(),
            entries,
        }
    }
}

/// Response body for `GET /exists/:key`
#[derive(Debug, Clone, Serialize)]
pub struct ExistsResponse {
    pub key: String,
    pub exists: bool,
}

/// Response body for `POST /render`
#[derive(Debug, Clone, Serialize)]
pub struct RenderResponse {
    pub text: Option<String>,
}

/// Response body for `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub enabled: bool,
    pub datastore: StatsSnapshot,
    /// None when no cache is bound
    pub cache: Option<CacheStatsResponse>,
}

/// Cache section of `StatsResponse`
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    #[serde(flatten)]
    pub counters: CacheStats,
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(counters: CacheStats) -> Self {
        Self {
            hit_rate: counters.hit_rate(),
            counters,
        }
    }
}

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy", or "degraded" once storage has been disabled
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn from_enabled(enabled: bool) -> Self {
        Self {
            status: if enabled { "healthy" } else { "degraded" }.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
