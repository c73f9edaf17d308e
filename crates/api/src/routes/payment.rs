//! Route definitions for the `/payment` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::payment;
use crate::state::AppState;

/// Routes mounted at `/payment` (all require auth).
///
/// ```text
/// POST /create  -> create a gateway order
/// POST /verify  -> verify checkout signature, capture payment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(payment::create))
        .route("/verify", post(payment::verify))
}
