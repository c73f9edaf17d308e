//! Handlers for the `/admin` resource (order management and the stats rollup).

use axum::extract::{Path, State};
use axum::Json;

use sagedo_core::error::CoreError;
use sagedo_core::events::EVENT_ORDER_STATUS_CHANGED;
use sagedo_core::order::OrderStatus;
use sagedo_core::types::DbId;
use sagedo_db::models::feedback::Feedback;
use sagedo_db::models::order::{Order, UpdateOrderStatus};
use sagedo_db::repositories::{DashboardStats, FeedbackRepo, OrderActivityRepo, OrderRepo, VisitRepo};
use sagedo_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/orders
///
/// Every order on the platform, newest first.
pub async fn list_orders(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<DataResponse<Vec<Order>>> {
    let orders = OrderRepo::list_all(&state.pool).await?;
    Ok(DataResponse::new(orders))
}

/// PATCH /api/v1/admin/orders/{id}/status
///
/// Move an order forward through the fulfilment pipeline. Backward moves
/// and no-op repeats are rejected; reaching `delivered` stamps
/// `delivered_at` exactly once.
pub async fn update_order_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOrderStatus>,
) -> AppResult<DataResponse<Order>> {
    let next = OrderStatus::parse(&input.status).map_err(AppError::Core)?;

    let order = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "order",
            id,
        }))?;

    let current = OrderStatus::parse(&order.status).map_err(AppError::Core)?;
    if !current.can_transition_to(next) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot move order from '{}' to '{}'",
            current.as_str(),
            next.as_str()
        ))));
    }

    let mut tx = state.pool.begin().await?;

    let updated = OrderRepo::update_status(
        &mut *tx,
        id,
        next.as_str(),
        input.delivery_notes.as_deref(),
        input.delivery_file_urls.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "order",
        id,
    }))?;

    OrderActivityRepo::create(
        &mut *tx,
        id,
        "status_change",
        &format!("Order status changed to {}", next.as_str()),
    )
    .await?;

    tx.commit().await?;

    state.event_bus.publish(
        PlatformEvent::new(EVENT_ORDER_STATUS_CHANGED)
            .with_source("order", id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({
                "user_id": updated.user_id,
                "service_name": updated.service_name,
                "customer_email": updated.customer_email,
                "status": next.as_str(),
            })),
    );

    Ok(DataResponse::new(updated))
}

/// GET /api/v1/admin/stats
///
/// The dashboard rollup: user counts, visits, popular services, recent
/// visitors and signups.
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<DataResponse<DashboardStats>> {
    let stats = VisitRepo::dashboard_stats(&state.pool).await?;
    Ok(DataResponse::new(stats))
}

/// GET /api/v1/admin/feedback
///
/// All submitted feedback, newest first.
pub async fn list_feedback(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<DataResponse<Vec<Feedback>>> {
    let feedback = FeedbackRepo::list_all(&state.pool).await?;
    Ok(DataResponse::new(feedback))
}
