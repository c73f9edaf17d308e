//! Route definitions for the customer `/orders` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Routes mounted at `/orders` (all require auth).
///
/// ```text
/// POST /                        -> place an order
/// GET  /{id}                    -> order detail (owner or admin)
/// GET  /{id}/activities         -> activity feed (owner or admin)
/// POST /{id}/activities/read    -> clear unread badge
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create))
        .route("/{id}", get(orders::get))
        .route("/{id}/activities", get(orders::activities))
        .route("/{id}/activities/read", post(orders::mark_activities_read))
}
