//! Handlers for the `/payment` resource (gateway checkout).
//!
//! Flow: the client asks us to create a gateway order, pays through the
//! gateway's checkout widget, then posts the resulting ids and signature
//! back for verification. Only a verified signature marks the order paid.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use sagedo_core::error::CoreError;
use sagedo_core::events::EVENT_PAYMENT_CAPTURED;
use sagedo_core::order::PaymentStatus;
use sagedo_core::types::DbId;
use sagedo_db::models::order::Order;
use sagedo_db::repositories::{OrderActivityRepo, OrderRepo, ServiceRepo};
use sagedo_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::payment::{verify_payment_signature, PaymentClient};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /payment/create`.
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub order_id: DbId,
}

/// Response payload with everything the checkout widget needs.
#[derive(Debug, Serialize)]
pub struct CreatePaymentResponse {
    pub gateway_order_id: String,
    /// Amount in paise.
    pub amount: i64,
    pub currency: String,
    /// Public gateway key for the checkout widget.
    pub key_id: String,
}

/// Request body for `POST /payment/verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyPaymentRequest {
    pub order_id: DbId,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub signature: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/payment/create
///
/// Create a gateway order for an unpaid order's catalog price.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreatePaymentRequest>,
) -> AppResult<DataResponse<CreatePaymentResponse>> {
    let client = payment_client(&state)?;
    let (order, price) = find_payable_order(&state, &auth_user, input.order_id).await?;

    let gateway_order = client.create_order(price as i64, order.id.to_string()).await?;

    Ok(DataResponse::new(CreatePaymentResponse {
        gateway_order_id: gateway_order.id,
        amount: gateway_order.amount,
        currency: gateway_order.currency,
        key_id: client.key_id().to_string(),
    }))
}

/// POST /api/v1/payment/verify
///
/// Verify the checkout signature and capture the payment. A bad signature
/// marks the payment attempt failed and returns 401.
pub async fn verify(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<VerifyPaymentRequest>,
) -> AppResult<DataResponse<Order>> {
    let client = payment_client(&state)?;
    let (order, price) = find_payable_order(&state, &auth_user, input.order_id).await?;

    let valid = verify_payment_signature(
        &input.gateway_order_id,
        &input.gateway_payment_id,
        &input.signature,
        client.key_secret(),
    );

    if !valid {
        OrderRepo::mark_payment_failed(&state.pool, order.id).await?;
        tracing::warn!(order_id = order.id, "Payment signature verification failed");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Payment signature verification failed".into(),
        )));
    }

    let updated = OrderRepo::mark_paid(&state.pool, order.id, &input.gateway_payment_id, price)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "order",
            id: order.id,
        }))?;

    OrderActivityRepo::create(
        &state.pool,
        order.id,
        "payment",
        &format!("Payment of ₹{price} received"),
    )
    .await?;

    state.event_bus.publish(
        PlatformEvent::new(EVENT_PAYMENT_CAPTURED)
            .with_source("order", order.id)
            .with_actor(auth_user.user_id)
            .with_payload(serde_json::json!({
                "service_name": updated.service_name,
                "customer_email": updated.customer_email,
                "amount": price,
                "payment_id": input.gateway_payment_id,
            })),
    );

    Ok(DataResponse::new(updated))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The configured gateway client, or 503 when payments are disabled.
fn payment_client(state: &AppState) -> AppResult<&PaymentClient> {
    state
        .payment
        .as_deref()
        .ok_or_else(|| AppError::ServiceUnavailable("Payments are not configured".into()))
}

/// Fetch an order the user owns that still needs a gateway payment, and
/// resolve its catalog price.
async fn find_payable_order(
    state: &AppState,
    auth_user: &AuthUser,
    order_id: DbId,
) -> AppResult<(Order, i32)> {
    let order = OrderRepo::find_by_id(&state.pool, order_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "order",
            id: order_id,
        }))?;

    if order.user_id != auth_user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this order".into(),
        )));
    }

    if PaymentStatus::parse(&order.payment_status).map_err(AppError::Core)? == PaymentStatus::Paid {
        return Err(AppError::Core(CoreError::Conflict(
            "Order is already paid".into(),
        )));
    }
    if order.paid_with_tokens || order.paid_with_golden {
        return Err(AppError::Core(CoreError::Conflict(
            "Order was settled with tokens or the golden ticket".into(),
        )));
    }

    let service_id = order.service_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Custom orders have no catalog price to charge".into(),
        ))
    })?;
    let service = ServiceRepo::find_by_id(&state.pool, service_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "service",
            id: service_id,
        }))?;
    if service.price <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Service has no payable price".into(),
        )));
    }

    Ok((order, service.price))
}
