//! API Routes
//!
//! Configures the Axum router with all datastore endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_handler, delete_prefix_handler, exists_handler, get_handler, health_handler,
    list_handler, render_handler, set_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /data` - Store a key/value pair
/// - `GET /data?prefix=` - List entries whose key starts with a prefix
/// - `DELETE /data?prefix=` - Remove entries whose key starts with a prefix
/// - `GET /data/:key` - Retrieve a value
/// - `DELETE /data/:key` - Remove a key
/// - `GET /exists/:key` - Check whether a key is stored
/// - `POST /render` - Substitute `#dskey{...}` tokens in a text
/// - `GET /stats` - Datastore and cache counters
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/data",
            get(list_handler)
                .put(set_handler)
                .delete(delete_prefix_handler),
        )
        .route("/data/:key", get(get_handler).delete(delete_handler))
        .route("/exists/:key", get(exists_handler))
        .route("/render", post(render_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastore::DatastoreService;
    use crate::storage::MemoryStorage;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let datastore = DatastoreService::new(Arc::new(MemoryStorage::new()));
        create_router(AppState::new(Arc::new(datastore)))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_set_endpoint() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/data")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"key":"test","value":"hello"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/data/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
