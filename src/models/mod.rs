//! Request and Response models for the datastore API
//!
//! DTOs used for serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

pub use requests::{
    validate_key, PrefixQuery, RenderRequest, SetRequest, ValueQuery, MAX_KEY_LENGTH,
};
pub use responses::{
    CacheStatsResponse, DeleteResponse, EntriesResponse, ExistsResponse, HealthResponse,
    RenderResponse, SetResponse, StatsResponse, ValueResponse,
};
