//! Background Tasks Module
//!
//! # Tasks
//! - Cache sweep: drops expired entities from the LRU cache at configured intervals

mod sweep;

pub use sweep::spawn_cache_sweep_task;
