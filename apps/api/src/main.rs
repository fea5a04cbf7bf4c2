//! # Tienda API
//!
//! HTTP server for the in-memory shop catalog.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tienda API Server                              │
//! │                                                                         │
//! │  Client ───► HTTP (8000) ───► Routes ───► Store (RwLock)               │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                              BlobStore                                  │
//! │                           (images dir)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tienda_api::{build_router, ApiConfig, AppState};
use tienda_store::{seed::seed_demo_catalog, FsBlobStore, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Tienda API server...");

    // Load configuration
    let config = ApiConfig::load().context("Failed to load configuration")?;
    info!(
        port = config.http_port,
        images_dir = %config.images_dir.display(),
        token_ttl_minutes = config.token_ttl_minutes,
        "Configuration loaded"
    );

    // Entity store
    let store = Store::new();
    if config.seed_demo {
        seed_demo_catalog(&store).context("Failed to load demo catalog")?;
    }
    let counts = store.counts()?;
    info!(
        products = counts.products,
        categories = counts.categories,
        "Entity store ready"
    );

    // Blob store
    let blobs = Arc::new(FsBlobStore::new(config.images_dir.clone()));
    info!(root = %blobs.root().display(), "Blob store ready");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let state = AppState::new(config, store, blobs);
    let app = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!(%addr, "Starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
