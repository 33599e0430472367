//! Liveness endpoint.

use axum::Json;
use relay_core::models::HealthResponse;

/// `GET /health` — always ok.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
