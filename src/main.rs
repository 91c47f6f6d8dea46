mod api;
mod config;
mod storage;

use crate::api::AppState;
use crate::config::{AppConfig, StoreBackend};
use crate::storage::{JsonlSheet, MemorySheet, SheetStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first so the log level can come from it
    let config = AppConfig::load()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    info!("🚀 Starting SlotLove API Server");
    info!("📋 Configuration loaded");
    info!("   - Store Backend: {}", config.storage.backend);
    info!("   - Sheet Path: {:?}", config.storage.sheet_path);
    info!("   - CORS: {}", config.cors.enabled);
    info!("   - Server: {}", config.bind_addr());

    // Acquire the sheet once; every request reuses it
    info!("💾 Initializing submission sheet...");
    let sheet: Arc<dyn SheetStore> = match config.storage.backend {
        StoreBackend::Jsonl => {
            let sheet = JsonlSheet::new(&config.storage.sheet_path);
            sheet.initialize()?;
            Arc::new(sheet)
        }
        StoreBackend::Memory => Arc::new(MemorySheet::new()),
    };
    info!("✅ Sheet ready ({})", sheet.describe());

    let state = AppState::new(sheet);
    let app = api::router(state, config.server.max_body_bytes, config.cors.enabled);

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET  /        - Liveness check");
    info!("   POST /        - Record submission");
    info!("   GET  /health  - Health report");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
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

    info!("🛑 Shutdown signal received");
}
