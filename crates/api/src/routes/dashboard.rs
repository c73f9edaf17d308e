//! Route definitions for the customer `/dashboard` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard` (all require auth).
///
/// ```text
/// GET /profile  -> profile (grants retroactive welcome bonus)
/// GET /orders   -> orders with unread activity counts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(dashboard::profile))
        .route("/orders", get(dashboard::orders))
}
