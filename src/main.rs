//! Cacher - HTTP front for JSON caching over Redis
//!
//! Serves the cacher operations over HTTP, backed by Redis or, for local
//! runs, by the in-memory backend.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cacher::api::create_router;
use cacher::{
    spawn_cleanup_task, AppState, BackendKind, Cacher, Config, MemoryBackend, RedisBackend,
};

/// Main entry point for the cacher server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the configured backend
/// 4. Start the expiry sweep when running in memory
/// 5. Serve the router until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cacher=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cacher");

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, store={}, prefix={}, default_ttl={}s, port={}",
        config.backend,
        config.store.connection_url(),
        config.prefix,
        config.default_ttl,
        config.server_port
    );

    let (cacher, cleanup_handle) = match config.backend {
        BackendKind::Redis => {
            let backend = RedisBackend::connect(&config.store)
                .await
                .context("connecting to Redis")?;
            (Cacher::new(backend), None)
        }
        BackendKind::Memory => {
            let backend = MemoryBackend::new();
            let handle = spawn_cleanup_task(backend.clone(), config.cleanup_interval);
            info!("In-memory backend with expiry sweep started");
            (Cacher::new(backend), Some(handle))
        }
    };

    let state = AppState::from_config(cacher, &config);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("serving HTTP")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the expiry sweep if one is running.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
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

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Expiry sweep aborted");
    }
}
