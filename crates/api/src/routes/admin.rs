//! Route definitions for the `/admin` resource.
//!
//! Every handler in this tree authorizes via the `RequireAdmin` extractor.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{admin, gallery, services};
use crate::state::AppState;

/// Routes mounted at `/admin` (admin only).
///
/// ```text
/// GET    /orders                 -> all orders
/// PATCH  /orders/{id}/status     -> advance fulfilment status
/// GET    /stats                  -> dashboard rollup
/// GET    /feedback               -> all feedback
///
/// POST   /services               -> create catalog item
/// PATCH  /services/{id}          -> update catalog item
/// DELETE /services/{id}          -> delete catalog item
///
/// GET    /gallery                -> all gallery entries (incl. hidden)
/// POST   /gallery                -> create gallery entry
/// PATCH  /gallery/{id}           -> update gallery entry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(admin::list_orders))
        .route("/orders/{id}/status", patch(admin::update_order_status))
        .route("/stats", get(admin::stats))
        .route("/feedback", get(admin::list_feedback))
        .route("/services", post(services::create))
        .route(
            "/services/{id}",
            patch(services::update).delete(services::delete),
        )
        .route("/gallery", get(gallery::list_all).post(gallery::create))
        .route("/gallery/{id}", patch(gallery::update))
}
