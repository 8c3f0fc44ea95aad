//! API Handlers
//!
//! HTTP request handlers exposing the datastore operations.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::datastore::DatastoreService;
use crate::error::{ApiError, Result};
use crate::models::{
    validate_key, DeleteResponse, EntriesResponse, ExistsResponse, HealthResponse, PrefixQuery,
    RenderRequest, RenderResponse, SetRequest, SetResponse, StatsResponse, ValueQuery,
    ValueResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub datastore: Arc<DatastoreService>,
}

impl AppState {
    pub fn new(datastore: Arc<DatastoreService>) -> Self {
        Self { datastore }
    }

    /// Runs a mutating datastore call on the blocking pool.
    ///
    /// Storage writes may rewrite a file and must stay off the runtime
    /// worker threads.
    async fn write<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&DatastoreService) -> T + Send + 'static,
        T: Send + 'static,
    {
        let datastore = Arc::clone(&self.datastore);
        tokio::task::spawn_blocking(move || op(&datastore))
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))
    }
}

/// Handler for PUT /data
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let SetRequest { key, value } = req;
    let key = state
        .write(move |datastore| {
            datastore.set_value(&key, &value);
            key
        })
        .await?;
    Ok(Json(SetResponse::new(key)))
}

/// Handler for GET /data/:key
///
/// Answers 404 for an absent key unless `?default=` is given.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<ValueQuery>,
) -> Result<Json<ValueResponse>> {
    match (state.datastore.find_value(&key), query.default) {
        (Some(value), _) | (None, Some(value)) => Ok(Json(ValueResponse::new(key, value))),
        (None, None) => Err(ApiError::NotFound(key)),
    }
}

/// Handler for DELETE /data/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let response = DeleteResponse::key(&key);
    state
        .write(move |datastore| datastore.remove_value(&key))
        .await?;
    Ok(Json(response))
}

/// Handler for GET /data?prefix=
pub async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<PrefixQuery>,
) -> Json<EntriesResponse> {
    let entries = state.datastore.get_by_prefix(&query.prefix);
    Json(EntriesResponse::new(query.prefix, entries))
}

/// Handler for DELETE /data?prefix=
///
/// An empty prefix would match every key and is rejected.
pub async fn delete_prefix_handler(
    State(state): State<AppState>,
    Query(query): Query<PrefixQuery>,
) -> Result<Json<DeleteResponse>> {
    if let Some(error_msg) = validate_key(&query.prefix) {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let response = DeleteResponse::prefix(&query.prefix);
    let prefix = query.prefix;
    state
        .write(move |datastore| datastore.remove_by_prefix(&prefix))
        .await?;
    Ok(Json(response))
}

/// Handler for GET /exists/:key
pub async fn exists_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<ExistsResponse> {
    let exists = state.datastore.key_exists(&key);
    Json(ExistsResponse { key, exists })
}

/// Handler for POST /render
pub async fn render_handler(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Json<RenderResponse> {
    let text = state
        .datastore
        .replace_keys_opt(req.text.as_deref())
        .map(|rendered| rendered.into_owned());
    Json(RenderResponse { text })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        enabled: state.datastore.is_enabled(),
        datastore: state.datastore.stats(),
        cache: state.datastore.cache_stats().map(Into::into),
    })
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::from_enabled(state.datastore.is_enabled()))
}
