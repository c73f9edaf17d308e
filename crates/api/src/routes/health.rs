//! Root-level health endpoint for load balancers and uptime checks.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database is reachable, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database answered a probe query.
    pub db_healthy: bool,
    /// Whether gateway payments are configured on this deployment.
    pub payments_enabled: bool,
    /// Currently open WebSocket connections.
    pub ws_connections: usize,
}

/// GET /health -- service health plus the state of optional integrations.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = sagedo_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        payments_enabled: state.payment.is_some(),
        ws_connections: state.ws_manager.connection_count().await,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
