//! Token ledger entry model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sagedo_core::types::{DbId, Timestamp};

/// Signed ledger row from the `token_transactions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TokenTransaction {
    pub id: DbId,
    pub user_id: DbId,
    /// Positive for credits, negative for spends.
    pub amount: i32,
    /// One of the `TokenReason` string forms.
    pub reason: String,
    pub description: String,
    pub created_at: Timestamp,
}

/// DTO for appending a ledger entry.
#[derive(Debug, Deserialize)]
pub struct CreateTokenTransaction {
    pub user_id: DbId,
    pub amount: i32,
    pub reason: String,
    pub description: String,
}
