//! Order activity feed model.

use serde::Serialize;
use sqlx::FromRow;

use sagedo_core::types::{DbId, Timestamp};

/// Activity row from the `order_activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderActivity {
    pub id: DbId,
    pub order_id: DbId,
    /// One of `created`, `status_change`, `payment`, `note`.
    pub kind: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}
