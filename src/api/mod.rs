//! API Module
//!
//! HTTP handlers and routing exposing the datastore as a REST API.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
