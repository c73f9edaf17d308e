//! Handlers for the customer `/dashboard` resource.

use axum::extract::State;
use serde::Serialize;

use sagedo_core::error::CoreError;
use sagedo_db::models::order::Order;
use sagedo_db::models::user::UserResponse;
use sagedo_db::repositories::{OrderActivityRepo, OrderRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::tokens::grant_welcome_bonus;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// An order with its unread-activity badge count.
#[derive(Debug, Serialize)]
pub struct DashboardOrder {
    #[serde(flatten)]
    pub order: Order,
    pub unread_activities: i64,
}

/// GET /api/v1/dashboard/profile
///
/// The authenticated user's profile. Accounts that predate the welcome
/// bonus receive it retroactively on their first dashboard visit.
pub async fn profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<DataResponse<UserResponse>> {
    let granted = grant_welcome_bonus(&state.pool, auth_user.user_id).await?;
    if granted {
        tracing::info!(user_id = auth_user.user_id, "Granted retroactive welcome bonus");
    }

    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: auth_user.user_id,
        }))?;

    Ok(DataResponse::new(user.into()))
}

/// GET /api/v1/dashboard/orders
///
/// The authenticated user's orders, newest first, each with its unread
/// activity count for the notification badge.
pub async fn orders(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<DataResponse<Vec<DashboardOrder>>> {
    let orders = OrderRepo::list_for_user(&state.pool, auth_user.user_id).await?;

    let mut result = Vec::with_capacity(orders.len());
    for order in orders {
        let unread_activities = OrderActivityRepo::unread_count(&state.pool, order.id).await?;
        result.push(DashboardOrder {
            order,
            unread_activities,
        });
    }

    Ok(DataResponse::new(result))
}
