//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use desk_service::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with dependency health
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let ctx = state.service_context();

    // Check database connectivity
    let db_healthy = ctx.pool().acquire().await.is_ok();

    // Check the upload directory is still there
    let upload_dir_healthy = tokio::fs::metadata(ctx.attachments().root())
        .await
        .is_ok_and(|m| m.is_dir());

    let response = ReadinessResponse::ready(db_healthy, upload_dir_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
