//! Datastore server
//!
//! Serves the key/value datastore over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use datastore::api::{create_router, AppState};
use datastore::cache::LruEntityCache;
use datastore::{
    spawn_cache_sweep_task, Config, DatastoreService, JsonFileStorage, MemoryStorage, Storage,
};

/// Main entry point for the datastore server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open storage and create the datastore service
/// 4. Start the entity cache and its sweep task, once the service is up
/// 5. Serve the API until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "datastore=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Datastore Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, data_file={:?}, cache_enabled={}, cache_max_entries={}, cache_ttl={}s",
        config.server_port,
        config.data_file,
        config.cache_enabled,
        config.cache_max_entries,
        config.cache_ttl
    );

    let storage: Arc<dyn Storage> = match &config.data_file {
        Some(path) => Arc::new(
            JsonFileStorage::open(path)
                .with_context(|| format!("opening datastore file {}", path.display()))?,
        ),
        None => {
            warn!("No DATASTORE_FILE set, using in-memory storage");
            Arc::new(MemoryStorage::new())
        }
    };
    let datastore = Arc::new(DatastoreService::new(storage));
    info!("Datastore initialized");

    // The cache is bound after the service exists
    let sweep_handle = if config.cache_enabled {
        let cache = Arc::new(LruEntityCache::new(
            config.cache_max_entries,
            Some(Duration::from_secs(config.cache_ttl)),
        ));
        datastore.bind_cache(cache.clone());
        Some(spawn_cache_sweep_task(cache, config.cleanup_interval))
    } else {
        info!("Datastore's cache disabled");
        None
    };

    let app = create_router(AppState::new(datastore));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("serving HTTP")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the sweep task.
async fn shutdown_signal(sweep_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = sweep_handle {
        handle.abort();
        warn!("Cache sweep task aborted");
    }
}
