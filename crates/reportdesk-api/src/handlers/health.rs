//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use reportdesk_core::result::AppResult;

use crate::dto::response::{ApiResponse, ComponentHealth, HealthResponse};
use crate::state::AppState;

fn component(backend: &str, result: AppResult<bool>) -> ComponentHealth {
    match result {
        Ok(healthy) => ComponentHealth {
            backend: backend.to_string(),
            healthy,
            error: None,
        },
        Err(e) => ComponentHealth {
            backend: backend.to_string(),
            healthy: false,
            error: Some(e.message),
        },
    }
}

/// GET /api/health
pub async fn health(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let records = component(state.records.backend_type(), state.records.health_check().await);
    let blobs = component(state.blobs.provider_type(), state.blobs.health_check().await);
    let healthy = records.healthy && blobs.healthy;

    let status = if healthy {
        StatusCode::OK
    } else {
        tracing::warn!(
            records = records.healthy,
            blobs = blobs.healthy,
            "Health check degraded"
        );
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = ApiResponse {
        success: healthy,
        data: HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            records,
            blobs,
        },
    };
    (status, Json(body))
}
