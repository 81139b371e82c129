//! Application builder: wires router, middleware and state into an Axum app.

use tracing::{info, warn};

use reportdesk_core::config::AppConfig;
use reportdesk_core::error::{AppError, ErrorKind};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> axum::Router {
    build_router(state)
}

/// Runs the ReportDesk server until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!(
        records = config.records.backend.as_str(),
        blobs = config.blobs.backend.as_str(),
        "Starting ReportDesk server"
    );

    let addr = config.server.bind_address();
    let state = AppState::from_config(config).await?;

    // Warm the list so the first request is served from the snapshot. A
    // failure here is recorded in the list state, not fatal.
    let initial = state.reports.load().await;
    info!(records = initial.records().len(), "Initial report list loaded");

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;

    info!(address = %addr, "ReportDesk server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    info!("ReportDesk server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
