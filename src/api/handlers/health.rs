//! Health check endpoint.
//!
//! Checks the active storage backend through the role lookup, which every
//! backend can answer without side effects.

use std::time::Instant;

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::api::dto::{HealthResponse, HealthStatus};
use crate::state::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// `200 OK` when storage answers, `503 Service Unavailable` otherwise.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let started = Instant::now();

    let status = match state.services.roles.list_all().await {
        Ok(_) => HealthStatus::Healthy,
        Err(e) => {
            tracing::warn!(error = %e, storage = %state.storage, "Storage health check failed");
            HealthStatus::Unhealthy
        }
    };
    tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, ?status, "Health check");

    let code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: crate::pkg_version().to_string(),
            storage: state.storage.to_string(),
        }),
    )
}
