//! Event-to-notification routing engine.
//!
//! [`NotificationRouter`] subscribes to the platform event bus and pushes
//! each event to the affected WebSocket clients: business events go to all
//! admin dashboards, order status changes go to the order's owner.

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;

use sagedo_core::events::{
    EVENT_FEEDBACK_SUBMITTED, EVENT_ORDER_CREATED, EVENT_ORDER_STATUS_CHANGED,
    EVENT_PAYMENT_CAPTURED, EVENT_USER_REGISTERED,
};
use sagedo_core::types::DbId;
use sagedo_db::repositories::UserRepo;
use sagedo_db::DbPool;
use sagedo_events::PlatformEvent;

use crate::ws::WsManager;

/// Routes platform events to connected WebSocket clients.
///
/// Consumes events from the broadcast channel and, for each event,
/// determines the target users and pushes a JSON notification frame to
/// their connections.
pub struct NotificationRouter {
    pool: DbPool,
    ws_manager: Arc<WsManager>,
}

impl NotificationRouter {
    /// Create a new router with the given database pool and WebSocket manager.
    pub fn new(pool: DbPool, ws_manager: Arc<WsManager>) -> Self {
        Self { pool, ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](sagedo_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.route_event(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to route event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Route a single event to all affected users.
    async fn route_event(&self, event: &PlatformEvent) -> Result<(), sqlx::Error> {
        for user_id in self.determine_targets(event).await? {
            self.push_to_user(user_id, event).await;
        }
        Ok(())
    }

    /// Determine which users should receive a notification for the event.
    ///
    /// Business activity (new orders, payments, feedback, signups) goes to
    /// the admin dashboard; order status changes go to the order's owner.
    async fn determine_targets(&self, event: &PlatformEvent) -> Result<Vec<DbId>, sqlx::Error> {
        match event.event_type.as_str() {
            EVENT_ORDER_CREATED | EVENT_PAYMENT_CAPTURED | EVENT_FEEDBACK_SUBMITTED
            | EVENT_USER_REGISTERED => UserRepo::admin_ids(&self.pool).await,

            // The status-change publisher puts the order owner's id in the
            // payload; the actor is the admin who made the change.
            EVENT_ORDER_STATUS_CHANGED => {
                let owner = event
                    .payload
                    .get("user_id")
                    .and_then(serde_json::Value::as_i64);
                Ok(owner.into_iter().collect())
            }

            _ => Ok(vec![]),
        }
    }

    /// Push a JSON notification frame over all of the user's connections.
    async fn push_to_user(&self, user_id: DbId, event: &PlatformEvent) {
        let msg = serde_json::json!({
            "type": "notification",
            "event_type": event.event_type,
            "payload": event.payload,
            "timestamp": event.timestamp,
        });
        let ws_msg = Message::Text(msg.to_string().into());
        let sent = self.ws_manager.send_to_user(user_id, ws_msg).await;
        tracing::debug!(
            user_id,
            event_type = %event.event_type,
            connections = sent,
            "Pushed notification"
        );
    }
}
