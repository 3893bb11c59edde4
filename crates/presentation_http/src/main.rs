//! Play catalog HTTP server
//!
//! Main entry point for the HTTP API server.

use std::time::Duration;

use infrastructure::{AppConfig, init_logging};
use presentation_http::{bootstrap, create_app};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before logging so the log format can be honored
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_logging(&config.server.log_filter, config.server.log_format)?;

    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }
    for warning in config.warnings() {
        warn!("⚠️  {warning}");
    }

    info!("🎮 Play Catalog v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        environment = %config.environment(),
        host = %config.server.host,
        port = %config.server.port,
        chaos = config.chaos.enabled,
        events = config.events.enabled,
        "Configuration loaded"
    );

    let wired = bootstrap(&config)?;
    let app = create_app(wired.state, &config.server);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);
    info!("📚 API docs: http://{}/swagger-ui", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    // The router owned the last event sender; the log task drains and exits
    if let Some(event_log) = wired.event_log {
        match tokio::time::timeout(shutdown_timeout, event_log).await {
            Ok(Ok(logged)) => info!(logged, "Event log stopped"),
            Ok(Err(e)) => warn!("Event log task failed: {}", e),
            Err(_) => warn!("Event log did not stop within {:?}", shutdown_timeout),
        }
    }

    info!("👋 Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
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

    info!("⏳ Waiting up to {:?} for connections to close...", timeout);
}
