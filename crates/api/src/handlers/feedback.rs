//! Handlers for the public `/feedback` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use sagedo_core::events::EVENT_FEEDBACK_SUBMITTED;
use sagedo_db::models::feedback::{CreateFeedback, Feedback};
use sagedo_db::repositories::FeedbackRepo;
use sagedo_events::PlatformEvent;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /feedback`.
#[derive(Debug, Deserialize, Validate)]
pub struct FeedbackRequest {
    pub name: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(range(min = 1, max = 5, message = "rating must be 1-5"))]
    pub rating: i32,
    #[validate(length(min = 1, max = 2000, message = "message must be 1-2000 characters"))]
    pub message: String,
    pub page: Option<String>,
}

/// POST /api/v1/feedback
///
/// Submit feedback. Works anonymously; when a valid token is presented
/// the entry is linked to the account.
pub async fn create(
    State(state): State<AppState>,
    auth_user: Option<AuthUser>,
    Json(input): Json<FeedbackRequest>,
) -> AppResult<(StatusCode, DataResponse<Feedback>)> {
    input.validate()?;

    let feedback = FeedbackRepo::create(
        &state.pool,
        &CreateFeedback {
            user_id: auth_user.as_ref().map(|u| u.user_id),
            name: input.name,
            email: input.email,
            rating: input.rating,
            message: input.message,
            page: input.page,
        },
    )
    .await?;

    let mut event = PlatformEvent::new(EVENT_FEEDBACK_SUBMITTED)
        .with_source("feedback", feedback.id)
        .with_payload(serde_json::json!({
            "rating": feedback.rating,
            "page": feedback.page,
        }));
    if let Some(user) = &auth_user {
        event = event.with_actor(user.user_id);
    }
    state.event_bus.publish(event);

    Ok(DataResponse::created(feedback))
}
