//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sagedo_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub profile_image_url: Option<String>,
    pub token_balance: i32,
    pub has_golden_ticket: bool,
    pub has_welcome_bonus: bool,
    pub is_admin: bool,
    pub is_onboarding_completed: bool,
    pub onboarding_survey: Option<serde_json::Value>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub profile_image_url: Option<String>,
    pub token_balance: i32,
    pub has_golden_ticket: bool,
    pub is_admin: bool,
    pub is_onboarding_completed: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            name: user.name,
            profile_image_url: user.profile_image_url,
            token_balance: user.token_balance,
            has_golden_ticket: user.has_golden_ticket,
            is_admin: user.is_admin,
            is_onboarding_completed: user.is_onboarding_completed,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub is_admin: bool,
}

/// Compact user listing for the admin stats dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub created_at: Timestamp,
}
