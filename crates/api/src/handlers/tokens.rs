//! Handlers for the `/tokens` resource (earning and the ledger).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use sagedo_core::error::CoreError;
use sagedo_core::tokens::{daily_login_eligible, TokenReason, WELCOME_BONUS};
use sagedo_db::models::token_transaction::{CreateTokenTransaction, TokenTransaction};
use sagedo_db::repositories::{LedgerResult, TokenRepo, UserRepo};
use sagedo_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /tokens/earn`.
#[derive(Debug, Deserialize)]
pub struct EarnRequest {
    /// `referral` or `daily_login`.
    pub reason: String,
    /// Referred email, required for `referral`.
    pub referred_email: Option<String>,
}

/// Response payload for a successful earn.
#[derive(Debug, Serialize)]
pub struct EarnResponse {
    pub transaction: TokenTransaction,
    pub new_balance: i32,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/tokens/earn
///
/// Claim a self-service token reward. Referrals are deduplicated per
/// referred email; daily login is limited to one credit per UTC day.
pub async fn earn(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<EarnRequest>,
) -> AppResult<DataResponse<EarnResponse>> {
    let reason = TokenReason::parse(&input.reason).map_err(AppError::Core)?;
    let amount = reason.earn_amount().ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Reason '{}' cannot be earned directly",
            input.reason
        )))
    })?;

    // Eligibility is checked and the credit written under the same balance
    // lock, so two concurrent claims cannot both pass the check.
    let mut tx = state.pool.begin().await?;
    TokenRepo::lock_balance(&mut tx, auth_user.user_id).await?;

    let description = match reason {
        TokenReason::Referral => {
            let email = input
                .referred_email
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .ok_or_else(|| {
                    AppError::Core(CoreError::Validation(
                        "referred_email is required for referral rewards".into(),
                    ))
                })?;

            if TokenRepo::referral_exists(&mut *tx, auth_user.user_id, email).await? {
                return Err(AppError::Core(CoreError::Conflict(
                    "Referral for this email already credited".into(),
                )));
            }
            format!("Referral: {}", email.to_lowercase())
        }
        TokenReason::DailyLogin => {
            let last = TokenRepo::last_by_reason(
                &mut *tx,
                auth_user.user_id,
                TokenReason::DailyLogin.as_str(),
            )
            .await?;
            if !daily_login_eligible(last.map(|t| t.created_at), chrono::Utc::now()) {
                return Err(AppError::Core(CoreError::Conflict(
                    "Daily login reward already claimed today".into(),
                )));
            }
            "Daily login reward".to_string()
        }
        _ => unreachable!("earn_amount returned Some for a non-earnable reason"),
    };

    let result = TokenRepo::apply_in(
        &mut tx,
        &CreateTokenTransaction {
            user_id: auth_user.user_id,
            amount,
            reason: reason.as_str().to_string(),
            description,
        },
    )
    .await?;

    match result {
        LedgerResult::Applied {
            transaction,
            new_balance,
        } => {
            tx.commit().await?;
            Ok(DataResponse::new(EarnResponse {
                transaction,
                new_balance,
            }))
        }
        // Credits are positive; this arm is unreachable in practice.
        LedgerResult::InsufficientBalance { .. } => Err(AppError::InternalError(
            "Credit rejected for insufficient balance".into(),
        )),
    }
}

/// GET /api/v1/tokens/transactions
///
/// The authenticated user's ledger, newest first.
pub async fn transactions(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<DataResponse<Vec<TokenTransaction>>> {
    let entries = TokenRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    Ok(DataResponse::new(entries))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Grant the one-time welcome bonus (tokens + golden ticket) if not yet granted.
///
/// The flag flip and the ledger credit commit atomically; concurrent calls
/// race on the conditional UPDATE so at most one wins. Returns `true` when
/// the bonus was granted by this call.
pub(crate) async fn grant_welcome_bonus(
    pool: &DbPool,
    user_id: sagedo_core::types::DbId,
) -> AppResult<bool> {
    let mut tx = pool.begin().await?;

    if !UserRepo::mark_welcome_bonus(&mut *tx, user_id).await? {
        return Ok(false);
    }

    let result = TokenRepo::apply_in(
        &mut tx,
        &CreateTokenTransaction {
            user_id,
            amount: WELCOME_BONUS,
            reason: TokenReason::Welcome.as_str().to_string(),
            description: "Welcome bonus".to_string(),
        },
    )
    .await?;

    match result {
        LedgerResult::Applied { .. } => {
            tx.commit().await?;
            Ok(true)
        }
        LedgerResult::InsufficientBalance { .. } => Err(AppError::InternalError(
            "Welcome credit rejected for insufficient balance".into(),
        )),
    }
}
