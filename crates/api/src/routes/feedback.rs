//! Route definitions for the public `/feedback` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::feedback;
use crate::state::AppState;

/// Routes mounted at `/feedback`.
///
/// ```text
/// POST /  -> submit feedback (anonymous or authenticated)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(feedback::create))
}
