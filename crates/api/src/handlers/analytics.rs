//! Handlers for the `/analytics` resource (site visit tracking).

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use sagedo_db::models::site_visit::CreateSiteVisit;
use sagedo_db::repositories::VisitRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// Request body for `POST /analytics/track-visit`.
#[derive(Debug, Deserialize, Validate)]
pub struct TrackVisitRequest {
    #[validate(length(min = 1, max = 500, message = "path must be 1-500 characters"))]
    pub path: String,
    pub referrer: Option<String>,
}

/// POST /api/v1/analytics/track-visit
///
/// Log a page view. User agent and client IP are taken from the request
/// headers. Returns 204 No Content.
pub async fn track_visit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<TrackVisitRequest>,
) -> AppResult<StatusCode> {
    input.validate()?;

    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    // First hop of X-Forwarded-For when behind a proxy.
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string());

    VisitRepo::create(
        &state.pool,
        &CreateSiteVisit {
            path: input.path,
            referrer: input.referrer,
            user_agent,
            ip_address,
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
