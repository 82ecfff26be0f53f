//! Wick relay server — local IPC relay with hook-based message dispatch.
//!
//! Main entry point that wires the crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use wick_api::state::AppState;
use wick_core::config::AppConfig;
use wick_core::error::AppError;
use wick_relay::RelayEngine;

#[tokio::main]
async fn main() {
    let env = std::env::var("WICK_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Wick relay v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Relay engine ─────────────────────────────────────
    let engine = Arc::new(RelayEngine::new(config.relay.clone()));

    // ── Step 2: Periodic image broadcast ─────────────────────────
    let broadcast_handle = engine.start_image_broadcast();
    tracing::info!(
        interval_seconds = config.relay.image_broadcast_interval_seconds,
        "Image broadcast task started"
    );

    // ── Step 3: Bind and serve the socket endpoint ───────────────
    let state = AppState {
        config: Arc::new(config.clone()),
        engine: Arc::clone(&engine),
    };
    let app = wick_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::transport(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Wick relay listening on {}", addr);

    // ── Step 4: Graceful shutdown ────────────────────────────────
    let shutdown_engine = Arc::clone(&engine);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        shutdown_engine.shutdown();
    });

    server
        .await
        .map_err(|e| AppError::transport(format!("Server error: {e}")))?;

    // ── Step 5: Wait for background tasks ────────────────────────
    let grace = std::time::Duration::from_secs(config.server.shutdown_grace_seconds);
    let _ = tokio::time::timeout(grace, broadcast_handle).await;

    tracing::info!("Wick relay shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
