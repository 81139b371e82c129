//! Route definitions for the ReportDesk HTTP API.
//!
//! Report and health routes are mounted under `/api`; locally stored avatars
//! are served under `/media`.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::get,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Room for the text parts and multipart framing around an image.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.blobs.max_upload_size_bytes as usize + FORM_OVERHEAD_BYTES;
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    let api_routes = Router::new()
        .merge(report_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .merge(media_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(build_compression_layer())
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&state.config.server.cors))
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

/// Report endpoints: submit, list, state, edit, delete
fn report_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reports",
            get(handlers::reports::list_reports).post(handlers::reports::create_report),
        )
        .route("/reports/state", get(handlers::reports::report_state))
        .route(
            "/reports/{id}",
            axum::routing::put(handlers::reports::update_report)
                .delete(handlers::reports::delete_report),
        )
}

/// Health endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Avatar blobs for the memory and local backends
fn media_routes() -> Router<AppState> {
    Router::new().route("/media/{*key}", get(handlers::media::get_media))
}
