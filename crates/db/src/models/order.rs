//! Order entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sagedo_core::types::{DbId, Timestamp};

/// Order row from the `orders` table.
///
/// `status` and `payment_status` are stored as their string forms; parse
/// with `OrderStatus::parse` / `PaymentStatus::parse` when the state
/// machine needs to reason about them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub user_id: DbId,
    pub service_id: Option<DbId>,
    pub service_name: String,
    pub customer_email: String,
    pub customer_name: Option<String>,
    pub requirements: Option<String>,
    pub file_urls: Vec<String>,
    pub status: String,
    pub paid_with_tokens: bool,
    pub paid_with_golden: bool,
    pub amount_paid: i32,
    pub payment_id: Option<String>,
    pub payment_status: String,
    pub delivery_notes: Option<String>,
    pub delivered_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new order row.
#[derive(Debug, Deserialize)]
pub struct CreateOrder {
    pub user_id: DbId,
    pub service_id: Option<DbId>,
    pub service_name: String,
    pub customer_email: String,
    pub customer_name: Option<String>,
    pub requirements: Option<String>,
    pub file_urls: Vec<String>,
    pub paid_with_tokens: bool,
    pub paid_with_golden: bool,
    pub amount_paid: i32,
}

/// DTO for an admin status update.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatus {
    pub status: String,
    pub delivery_notes: Option<String>,
    pub delivery_file_urls: Option<Vec<String>>,
}
