//! Feedback entity model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sagedo_core::types::{DbId, Timestamp};

/// Feedback row. `user_id` is null for anonymous visitors.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub name: Option<String>,
    pub email: Option<String>,
    /// 1-5 stars.
    pub rating: i32,
    pub message: String,
    pub page: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for submitting feedback.
#[derive(Debug, Deserialize)]
pub struct CreateFeedback {
    pub user_id: Option<DbId>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub rating: i32,
    pub message: String,
    pub page: Option<String>,
}
