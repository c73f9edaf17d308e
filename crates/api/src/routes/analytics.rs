//! Route definitions for the `/analytics` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Routes mounted at `/analytics` (public).
///
/// ```text
/// POST /track-visit  -> log a page view
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/track-visit", post(analytics::track_visit))
}
