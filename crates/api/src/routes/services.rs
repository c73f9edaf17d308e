//! Route definitions for the public `/services` catalog.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::services;
use crate::state::AppState;

/// Routes mounted at `/services` (public).
///
/// ```text
/// GET  /             -> full catalog
/// GET  /{id}         -> single service
/// POST /{id}/click   -> record catalog interest
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(services::list))
        .route("/{id}", get(services::get))
        .route("/{id}/click", post(services::click))
}
