//! HTTP server initialization and runtime setup.
//!
//! Builds the registry, telemetry pipeline, expiry sweeper and Axum server,
//! and shuts them down in order on SIGINT/SIGTERM.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::domain::sweeper::run_expiry_sweeper;
use crate::domain::{Registry, SystemClock};
use crate::infrastructure::telemetry::{
    HttpLogSink, Level, LogSink, NullLogSink, Package, TelemetryHandle, run_telemetry_worker,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - In-memory registry
/// - Telemetry sink (HTTP collector or NullLogSink) and its worker
/// - Background expiry sweeper (unless disabled)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The telemetry client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let registry = Arc::new(Registry::new(Arc::new(SystemClock)));

    let sink: Arc<dyn LogSink> = match config.telemetry_target() {
        Some((url, token)) => {
            tracing::info!("Telemetry enabled ({})", url);
            Arc::new(HttpLogSink::new(url, token).context("Failed to build telemetry client")?)
        }
        None => {
            tracing::info!("Telemetry disabled (NullLogSink)");
            Arc::new(NullLogSink::new())
        }
    };

    let (telemetry, telemetry_rx) = TelemetryHandle::channel(config.telemetry_queue_capacity);
    let telemetry_worker = tokio::spawn(run_telemetry_worker(telemetry_rx, sink));
    tracing::info!("Telemetry worker started");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = if config.sweep_interval_seconds > 0 {
        Some(tokio::spawn(run_expiry_sweeper(
            registry.clone(),
            Duration::from_secs(config.sweep_interval_seconds),
            shutdown_rx,
        )))
    } else {
        tracing::info!("Expiry sweeper disabled");
        None
    };

    let link_service = Arc::new(LinkService::new(
        registry,
        config.base_url.clone(),
        config.validity_policy(),
        telemetry.clone(),
    ));
    let state = AppState::new(link_service, telemetry.clone());

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    telemetry.backend(
        Level::Info,
        Package::Config,
        format!("server listening on {addr}"),
    );

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, shutting down background tasks");

    let _ = shutdown_tx.send(true);
    if let Some(sweeper) = sweeper {
        let _ = sweeper.await;
    }

    // The worker exits once every handle is dropped; the router's copies are
    // gone with the server.
    drop(telemetry);
    if tokio::time::timeout(Duration::from_secs(5), telemetry_worker)
        .await
        .is_err()
    {
        tracing::warn!("Telemetry worker did not drain within 5s");
    }

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
