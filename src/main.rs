//! Cache Gateway - HTTP facade over a key-value store
//!
//! Binary entry point: wires configuration, store, facade and router together.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_gateway::api::{create_router, AppState};
use cache_gateway::store::{MemoryStore, RedisStore, StoreClient};
use cache_gateway::{spawn_cleanup_task, Capacity, Config, StoreBackend};

/// Main entry point for the cache gateway.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect to the configured store (and start the expiry sweep for the
///    in-process store)
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cache gateway");

    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    let (store, cleanup_handle) = build_store(&config).await?;
    let capacity = Capacity::from_config(config.max_entries);
    info!(
        "Store ready: backend={}, capacity={:?}",
        store.backend_name(),
        capacity
    );

    let app = create_router(AppState::from_store(store, capacity));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Creates the configured store and, for the in-process store, its sweep task.
async fn build_store(
    config: &Config,
) -> anyhow::Result<(Arc<dyn StoreClient>, Option<JoinHandle<()>>)> {
    match config.backend {
        StoreBackend::Redis => {
            let store = RedisStore::connect(config)
                .await
                .context("failed to connect to Redis")?;
            info!("Using Redis store at {}", store.address());
            let store: Arc<dyn StoreClient> = Arc::new(store);
            Ok((store, None))
        }
        StoreBackend::Memory => {
            let store = Arc::new(MemoryStore::new());
            let handle = spawn_cleanup_task(store.clone(), config.cleanup_interval);
            info!("Background cleanup task started");
            let store: Arc<dyn StoreClient> = store;
            Ok((store, Some(handle)))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task if one is running.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
