//! Product Cache - a product catalogue service with a read-through cache
//!
//! Serves `POST /product-add` and `GET /product` over PostgreSQL and Redis.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_cache::api::{create_router, AppState};
use product_cache::cache::{MemoryCache, RedisCache};
use product_cache::config::{Config, StorageBackend};
use product_cache::service::ProductService;
use product_cache::spawn_cleanup_task;
use product_cache::store::{MemoryProductStore, PgProductStore};

/// Main entry point for the product service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the store and cache (or build in-memory ones)
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting product service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, cache_ttl={}s, operation_timeout={}ms, port={}",
        config.storage_backend, config.cache_ttl, config.operation_timeout_ms, config.server_port
    );

    let (service, cleanup_handle) = build_service(&config).await?;

    let app = create_router(AppState::new(service));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server terminated unexpectedly")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wires the store and cache selected by `config` into a service.
///
/// The in-memory backend also returns its cleanup task handle.
async fn build_service(config: &Config) -> anyhow::Result<(ProductService, Option<JoinHandle<()>>)> {
    let (service, cleanup_handle) = match config.storage_backend {
        StorageBackend::External => {
            info!(url = %config.redacted_database_url(), "Connecting to PostgreSQL");
            let store = PgProductStore::connect(
                &config.database_url,
                config.database_max_connections,
                config.operation_timeout(),
            )
            .await
            .context("failed to connect to PostgreSQL")?;

            info!(url = %config.redis_url, "Connecting to Redis");
            let cache = RedisCache::connect(
                &config.redis_url,
                config.redis_pool_size,
                config.operation_timeout(),
            )
            .await
            .context("failed to connect to Redis")?;

            (ProductService::new(Arc::new(store), Arc::new(cache)), None)
        }
        StorageBackend::Memory => {
            warn!("Using in-memory store and cache, data is lost on restart");
            let cache = Arc::new(MemoryCache::new());
            let handle = spawn_cleanup_task(cache.clone(), config.cleanup_interval);

            (
                ProductService::new(Arc::new(MemoryProductStore::new()), cache),
                Some(handle),
            )
        }
    };

    let service = service
        .with_ttl(config.cache_ttl())
        .with_operation_timeout(config.operation_timeout());

    Ok((service, cleanup_handle))
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task if one is running.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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
