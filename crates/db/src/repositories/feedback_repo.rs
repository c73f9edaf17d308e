//! Repository for the `feedback` table.

use sqlx::PgPool;

use crate::models::feedback::{CreateFeedback, Feedback};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, email, rating, message, page, created_at";

/// Provides operations for visitor/customer feedback.
pub struct FeedbackRepo;

impl FeedbackRepo {
    /// Insert a feedback entry, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFeedback) -> Result<Feedback, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedback (user_id, name, email, rating, message, page)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.rating)
            .bind(&input.message)
            .bind(&input.page)
            .fetch_one(pool)
            .await
    }

    /// List all feedback, newest first (admin view).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Feedback>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM feedback ORDER BY created_at DESC");
        sqlx::query_as::<_, Feedback>(&query).fetch_all(pool).await
    }
}
