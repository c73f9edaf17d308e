//! Repository for the `order_activities` table.

use sqlx::{PgExecutor, PgPool};

use sagedo_core::types::DbId;

use crate::models::order_activity::OrderActivity;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, order_id, kind, message, is_read, created_at";

/// Provides operations for the per-order activity feed.
pub struct OrderActivityRepo;

impl OrderActivityRepo {
    /// Append an activity entry.
    pub async fn create<'e, E>(
        executor: E,
        order_id: DbId,
        kind: &str,
        message: &str,
    ) -> Result<OrderActivity, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO order_activities (order_id, kind, message)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrderActivity>(&query)
            .bind(order_id)
            .bind(kind)
            .bind(message)
            .fetch_one(executor)
            .await
    }

    /// List an order's activities, newest first.
    pub async fn list_for_order(
        pool: &PgPool,
        order_id: DbId,
    ) -> Result<Vec<OrderActivity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM order_activities
             WHERE order_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, OrderActivity>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// Mark all of an order's activities as read. Returns the count updated.
    pub async fn mark_read(pool: &PgPool, order_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE order_activities SET is_read = true
             WHERE order_id = $1 AND is_read = false",
        )
        .bind(order_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Count unread activities for an order.
    pub async fn unread_count(pool: &PgPool, order_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM order_activities WHERE order_id = $1 AND is_read = false",
        )
        .bind(order_id)
        .fetch_one(pool)
        .await
    }
}
