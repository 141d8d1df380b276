mod config;
mod cv;
mod debounce;
mod errors;
mod forms;
mod persistence;
mod print;
mod routes;
mod state;
mod steps;
mod store;
mod templates;
mod validation;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::persistence::{FileStorage, KeyValueStorage, MemoryStorage};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV builder v{}", env!("CARGO_PKG_VERSION"));

    // Local storage slot; without a usable data dir the session is not kept
    let storage: Arc<dyn KeyValueStorage> = match FileStorage::open(&config.data_dir) {
        Ok(storage) => {
            info!("CV data directory: {}", storage.dir().display());
            Arc::new(storage)
        }
        Err(e) => {
            warn!("Data directory unusable, changes will not be kept: {e}");
            Arc::new(MemoryStorage::new())
        }
    };

    // Build app state (hydrates the document from storage)
    let state = AppState::new(config.clone(), storage);
    let bridge = Arc::clone(&state.bridge);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("127.0.0.1:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Don't lose the last burst of edits
    bridge.flush().await;
    info!("Saved pending changes, bye");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
