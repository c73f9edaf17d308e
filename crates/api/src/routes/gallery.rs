//! Route definitions for the public `/gallery` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::gallery;
use crate::state::AppState;

/// Routes mounted at `/gallery` (public).
///
/// ```text
/// GET /  -> visible testimonials and showcase items
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(gallery::list))
}
