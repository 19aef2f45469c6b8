//! Chaos engine HTTP server
//!
//! Main entry point for the chaos server.

use infrastructure::{AppConfig, init_logging};
use presentation_http::{
    AppState, ShutdownOutcome, routes, serve_with_shutdown, spawn_limiter_cleanup_task,
};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before logging so the log format is known
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_logging(&config.server)?;

    info!("🌀 Chaos server v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!(
        host = %config.server.host,
        port = %config.server.port,
        environment = %config.environment,
        default_enabled = config.chaos.default_enabled,
        "Configuration loaded"
    );

    let addr = config.server.bind_address();
    let shutdown_timeout = config.server.shutdown_timeout();
    let cleanup_interval = config.rate_limit.reset_window();

    let state = AppState::from_config(config)
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let cleanup_handle =
        spawn_limiter_cleanup_task(std::sync::Arc::clone(&state.reset_limiter), cleanup_interval);

    // Build router
    let app = routes::create_router(state);

    // Start server
    let listener = TcpListener::bind(&addr).await?;
    info!("🚀 Server listening on http://{}", addr);

    let outcome = serve_with_shutdown(listener, app, shutdown_signal(), shutdown_timeout).await?;

    cleanup_handle.abort();
    match outcome {
        ShutdownOutcome::Drained => info!("👋 Server shutdown complete"),
        ShutdownOutcome::TimedOut => warn!("👋 Server shutdown complete, open connections dropped"),
    }

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        // Log error but continue waiting - this is a best-effort signal handler
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
