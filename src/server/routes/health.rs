//! Health Routes
//!
//! Health check endpoints for monitoring.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::server::dto::HealthResponse;
use crate::server::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Full health status. The server is healthy as long as at least one page
/// is mounted.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let pages = state.registry.len();
    let status = if pages > 0 { "healthy" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        pages,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
