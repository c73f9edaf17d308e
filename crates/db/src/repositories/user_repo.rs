//! Repository for the `users` table.

use sqlx::{PgExecutor, PgPool};

use sagedo_core::types::DbId;

use crate::models::user::{CreateUser, User, UserSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, name, profile_image_url, token_balance, \
                        has_golden_ticket, has_welcome_bonus, is_admin, \
                        is_onboarding_completed, onboarding_survey, last_login_at, \
                        created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, name, is_admin)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.name)
            .bind(input.is_admin)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Record a successful login by bumping `last_login_at`.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Atomically consume the user's golden ticket.
    ///
    /// Returns `true` if the ticket was present and is now spent; `false`
    /// if the user had no ticket (or does not exist). Run inside the same
    /// transaction as the order insert so a failed order never burns the
    /// ticket.
    pub async fn consume_golden_ticket<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE users SET has_golden_ticket = false, updated_at = NOW()
             WHERE id = $1 AND has_golden_ticket = true",
        )
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Store the onboarding survey and mark onboarding completed.
    ///
    /// Returns `true` only on the first completion.
    pub async fn complete_onboarding<'e, E>(
        executor: E,
        id: DbId,
        survey: &serde_json::Value,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE users SET
                onboarding_survey = $2,
                is_onboarding_completed = true,
                updated_at = NOW()
             WHERE id = $1 AND is_onboarding_completed = false",
        )
        .bind(id)
        .bind(survey)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark the welcome bonus as granted (and hand out the golden ticket).
    ///
    /// Returns `true` only the first time. Run inside the same transaction
    /// as the welcome ledger credit.
    pub async fn mark_welcome_bonus<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE users SET
                has_welcome_bonus = true,
                has_golden_ticket = true,
                updated_at = NOW()
             WHERE id = $1 AND has_welcome_bonus = false",
        )
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all users.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }

    /// Count users created since the given instant.
    pub async fn count_since(
        pool: &PgPool,
        since: sagedo_core::types::Timestamp,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE created_at >= $1")
            .bind(since)
            .fetch_one(pool)
            .await
    }

    /// List the most recent signups.
    pub async fn recent_signups(pool: &PgPool, limit: i64) -> Result<Vec<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT id, email, name, created_at FROM users
             ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// List the IDs of all admin users (WebSocket push targets).
    pub async fn admin_ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM users WHERE is_admin = true")
            .fetch_all(pool)
            .await
    }
}
