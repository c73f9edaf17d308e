//! Handlers for the `/onboarding` resource.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use sagedo_core::error::CoreError;
use sagedo_core::tokens::{TokenReason, SURVEY_REWARD};
use sagedo_db::models::token_transaction::CreateTokenTransaction;
use sagedo_db::repositories::{LedgerResult, TokenRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /onboarding/survey`.
#[derive(Debug, Deserialize)]
pub struct SurveyRequest {
    /// Free-form survey answers, stored as-is.
    pub survey: serde_json::Value,
}

/// Response payload after submitting the survey.
#[derive(Debug, Serialize)]
pub struct SurveyResponse {
    pub reward_granted: i32,
    pub new_balance: i32,
}

/// POST /api/v1/onboarding/survey
///
/// Store the onboarding survey and grant the one-time survey reward. The
/// survey write and the ledger credit commit atomically, so resubmission
/// can never double-credit.
pub async fn submit_survey(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<SurveyRequest>,
) -> AppResult<DataResponse<SurveyResponse>> {
    if !input.survey.is_object() {
        return Err(AppError::Core(CoreError::Validation(
            "survey must be a JSON object".into(),
        )));
    }

    let mut tx = state.pool.begin().await?;

    let first_completion =
        UserRepo::complete_onboarding(&mut *tx, auth_user.user_id, &input.survey).await?;
    if !first_completion {
        return Err(AppError::Core(CoreError::Conflict(
            "Onboarding already completed".into(),
        )));
    }

    let result = TokenRepo::apply_in(
        &mut tx,
        &CreateTokenTransaction {
            user_id: auth_user.user_id,
            amount: SURVEY_REWARD,
            reason: TokenReason::Survey.as_str().to_string(),
            description: "Onboarding survey reward".to_string(),
        },
    )
    .await?;

    match result {
        LedgerResult::Applied { new_balance, .. } => {
            tx.commit().await?;
            Ok(DataResponse::new(SurveyResponse {
                reward_granted: SURVEY_REWARD,
                new_balance,
            }))
        }
        LedgerResult::InsufficientBalance { .. } => Err(AppError::InternalError(
            "Survey credit rejected for insufficient balance".into(),
        )),
    }
}
