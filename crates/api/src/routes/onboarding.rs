//! Route definitions for the `/onboarding` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Routes mounted at `/onboarding` (requires auth).
///
/// ```text
/// POST /survey  -> submit survey, one-time reward
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/survey", post(onboarding::submit_survey))
}
