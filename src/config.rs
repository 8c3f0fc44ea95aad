//! Configuration Module
//!
//! Handles loading and managing datastore configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Datastore server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// JSON file backing the store, None = in-memory storage
    pub data_file: Option<PathBuf>,
    /// Whether the entity cache is started after boot
    pub cache_enabled: bool,
    /// Maximum number of entities the cache can hold
    pub cache_max_entries: usize,
    /// TTL in seconds for cached entities
    pub cache_ttl: u64,
    /// Background cache sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATASTORE_FILE` - JSON storage file (default: unset, in-memory)
    /// - `CACHE_ENABLED` - Start the entity cache (default: true)
    /// - `CACHE_MAX_ENTRIES` - Maximum cached entities (default: 1000)
    /// - `CACHE_TTL` - Cached entity TTL in seconds (default: 300)
    /// - `CLEANUP_INTERVAL` - Cache sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            data_file: env::var("DATASTORE_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            cache_enabled: parse_var("CACHE_ENABLED").unwrap_or(defaults.cache_enabled),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            data_file: None,
            cache_enabled: true,
            cache_max_entries: 1000,
            cache_ttl: 300,
            cleanup_interval: 1,
        }
    }
}
