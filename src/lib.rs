//! Datastore - a cache-accelerated key/value configuration store
//!
//! Reads go through an optional entity cache, writes invalidate it, and the
//! first unavailable-storage failure switches the store into a permanent
//! fail-soft mode that answers with caller defaults.

pub mod api;
pub mod cache;
pub mod config;
pub mod datastore;
pub mod error;
pub mod models;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use datastore::{DatastoreService, VALUE_FALSE, VALUE_MISSING, VALUE_TRUE};
pub use storage::{DataEntity, JsonFileStorage, MemoryStorage, Storage};
pub use tasks::spawn_cache_sweep_task;
