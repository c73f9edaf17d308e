//! Handlers for the customer `/orders` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use sagedo_core::error::CoreError;
use sagedo_core::events::EVENT_ORDER_CREATED;
use sagedo_core::tokens::TokenReason;
use sagedo_core::types::DbId;
use sagedo_db::models::order::{CreateOrder, Order};
use sagedo_db::models::order_activity::OrderActivity;
use sagedo_db::models::token_transaction::CreateTokenTransaction;
use sagedo_db::repositories::{
    LedgerResult, OrderActivityRepo, OrderRepo, ServiceRepo, TokenRepo, UserRepo,
};
use sagedo_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /orders`.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Catalog service being ordered. Optional for custom requests.
    pub service_id: Option<DbId>,
    /// Required when no `service_id` is given.
    pub service_name: Option<String>,
    pub requirements: Option<String>,
    #[serde(default)]
    pub file_urls: Vec<String>,
    /// Pay the full price from the token balance.
    #[serde(default)]
    pub pay_with_tokens: bool,
    /// Redeem the one-time golden ticket for a free order.
    #[serde(default)]
    pub use_golden_ticket: bool,
}

/// Response payload for a created order.
#[derive(Debug, Serialize)]
pub struct CreatedOrder {
    #[serde(flatten)]
    pub order: Order,
    /// Token balance after any spend, when tokens were used.
    pub token_balance: Option<i32>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/orders
///
/// Place an order. Token spends and golden-ticket redemption commit in the
/// same transaction as the order row, so a failed insert never burns the
/// benefit.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, DataResponse<CreatedOrder>)> {
    if input.pay_with_tokens && input.use_golden_ticket {
        return Err(AppError::Core(CoreError::Validation(
            "Choose either token payment or the golden ticket, not both".into(),
        )));
    }

    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: auth_user.user_id,
        }))?;

    // Resolve the catalog service, when one is referenced.
    let service = match input.service_id {
        Some(id) => Some(ServiceRepo::find_by_id(&state.pool, id).await?.ok_or(
            AppError::Core(CoreError::NotFound {
                entity: "service",
                id,
            }),
        )?),
        None => None,
    };

    let service_name = match (&service, &input.service_name) {
        (Some(s), _) => s.name.clone(),
        (None, Some(name)) if !name.trim().is_empty() => name.trim().to_string(),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "Either service_id or service_name is required".into(),
            )))
        }
    };
    let price = service.as_ref().map(|s| s.price).unwrap_or(0);

    if input.use_golden_ticket {
        if let Some(s) = &service {
            if !s.is_golden_eligible {
                return Err(AppError::Core(CoreError::Validation(
                    "This service is not eligible for the golden ticket".into(),
                )));
            }
        }
    }

    let mut tx = state.pool.begin().await?;
    let mut token_balance = None;

    if input.use_golden_ticket {
        let consumed = UserRepo::consume_golden_ticket(&mut *tx, user.id).await?;
        if !consumed {
            return Err(AppError::Core(CoreError::Conflict(
                "No golden ticket available".into(),
            )));
        }
    } else if input.pay_with_tokens {
        if price <= 0 {
            return Err(AppError::Core(CoreError::Validation(
                "Token payment requires a priced catalog service".into(),
            )));
        }
        let result = TokenRepo::apply_in(
            &mut tx,
            &CreateTokenTransaction {
                user_id: user.id,
                amount: -price,
                reason: TokenReason::Spend.as_str().to_string(),
                description: format!("Order: {service_name}"),
            },
        )
        .await?;
        match result {
            LedgerResult::Applied { new_balance, .. } => token_balance = Some(new_balance),
            LedgerResult::InsufficientBalance { available } => {
                return Err(AppError::Core(CoreError::InsufficientTokens {
                    required: price,
                    available,
                }));
            }
        }
    }

    let amount_paid = if input.pay_with_tokens { price } else { 0 };
    let order = OrderRepo::create(
        &mut *tx,
        &CreateOrder {
            user_id: user.id,
            service_id: service.as_ref().map(|s| s.id),
            service_name: service_name.clone(),
            customer_email: user.email.clone(),
            customer_name: Some(user.name.clone()),
            requirements: input.requirements.clone(),
            file_urls: input.file_urls.clone(),
            paid_with_tokens: input.pay_with_tokens,
            paid_with_golden: input.use_golden_ticket,
            amount_paid,
        },
    )
    .await?;

    OrderActivityRepo::create(
        &mut *tx,
        order.id,
        "created",
        &format!("Order placed for {service_name}"),
    )
    .await?;

    tx.commit().await?;

    state.event_bus.publish(
        PlatformEvent::new(EVENT_ORDER_CREATED)
            .with_source("order", order.id)
            .with_actor(user.id)
            .with_payload(serde_json::json!({
                "service_name": service_name,
                "customer_email": user.email,
                "customer_name": user.name,
                "paid_with_tokens": input.pay_with_tokens,
                "paid_with_golden": input.use_golden_ticket,
                "amount": amount_paid,
            })),
    );

    Ok(DataResponse::created(CreatedOrder {
        order,
        token_balance,
    }))
}

/// GET /api/v1/orders/{id}
///
/// Visible to the order's owner and to admins.
pub async fn get(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<DataResponse<Order>> {
    let order = find_order_authorized(&state, &auth_user, id).await?;
    Ok(DataResponse::new(order))
}

/// GET /api/v1/orders/{id}/activities
///
/// The order's activity feed, newest first.
pub async fn activities(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<DataResponse<Vec<OrderActivity>>> {
    find_order_authorized(&state, &auth_user, id).await?;
    let activities = OrderActivityRepo::list_for_order(&state.pool, id).await?;
    Ok(DataResponse::new(activities))
}

/// POST /api/v1/orders/{id}/activities/read
///
/// Clear the order's unread-activity badge. Returns 204 No Content.
pub async fn mark_activities_read(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_order_authorized(&state, &auth_user, id).await?;
    OrderActivityRepo::mark_read(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch an order, enforcing owner-or-admin access.
async fn find_order_authorized(
    state: &AppState,
    auth_user: &AuthUser,
    id: DbId,
) -> AppResult<Order> {
    let order = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "order",
            id,
        }))?;

    if order.user_id != auth_user.user_id && !auth_user.is_admin {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this order".into(),
        )));
    }
    Ok(order)
}
