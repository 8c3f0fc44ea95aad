//! Datastore Module
//!
//! The cache-aside orchestrator: health gate, single-key and prefix
//! operations, and `#dskey{...}` token substitution.

mod health;
mod service;
mod stats;
pub mod template;


pub use health::HealthGate;
pub use service::{DatastoreService, VALUE_FALSE, VALUE_MISSING, VALUE_TRUE};
pub use stats::{DatastoreStats, StatsSnapshot};
