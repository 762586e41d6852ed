//! Health check handler.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use hotel_core::error::AppError;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Liveness and store reachability.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /api/health
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HealthStatus>>, ApiError> {
    state.store.health_check().await.map_err(|e| {
        tracing::warn!(error = %e, "Health check failed");
        AppError::service_unavailable("Database is unreachable")
    })?;

    Ok(Json(ApiResponse::ok(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })))
}
