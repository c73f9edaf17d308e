//! Gallery (testimonials and work showcase) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sagedo_core::types::{DbId, Timestamp};

/// Gallery row from the `gallery` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryItem {
    pub id: DbId,
    /// `testimonial` or `work_showcase`.
    pub kind: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub client_name: Option<String>,
    pub client_role: Option<String>,
    /// 1-5 stars, testimonials only.
    pub rating: Option<i32>,
    pub is_visible: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a gallery entry.
#[derive(Debug, Deserialize)]
pub struct CreateGalleryItem {
    pub kind: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub client_name: Option<String>,
    pub client_role: Option<String>,
    pub rating: Option<i32>,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

fn default_visible() -> bool {
    true
}

/// DTO for updating a gallery entry. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateGalleryItem {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub client_name: Option<String>,
    pub client_role: Option<String>,
    pub rating: Option<i32>,
    pub is_visible: Option<bool>,
}
