//! Route definitions for the `/tokens` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tokens;
use crate::state::AppState;

/// Routes mounted at `/tokens` (all require auth).
///
/// ```text
/// POST /earn          -> claim referral / daily-login reward
/// GET  /transactions  -> ledger history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/earn", post(tokens::earn))
        .route("/transactions", get(tokens::transactions))
}
