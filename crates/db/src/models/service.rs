//! Service catalog entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sagedo_core::types::{DbId, Timestamp};

/// Catalog item row from the `services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub name: String,
    pub description: String,
    /// Price in whole rupees.
    pub price: i32,
    pub category: String,
    pub image_url: Option<String>,
    pub is_golden_eligible: bool,
    pub delivery_time: Option<String>,
    pub click_count: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a catalog item.
#[derive(Debug, Deserialize)]
pub struct CreateService {
    pub name: String,
    pub description: String,
    pub price: i32,
    pub category: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_golden_eligible: bool,
    pub delivery_time: Option<String>,
}

/// DTO for updating a catalog item. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateService {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i32>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_golden_eligible: Option<bool>,
    pub delivery_time: Option<String>,
}
