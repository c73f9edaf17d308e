//! Site visit log model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sagedo_core::types::{DbId, Timestamp};

/// Visit row from the `site_visits` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteVisit {
    pub id: DbId,
    pub path: String,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub visited_at: Timestamp,
}

/// DTO for logging a visit.
#[derive(Debug, Deserialize)]
pub struct CreateSiteVisit {
    pub path: String,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}
