//! Repository for the `services` catalog table.

use sqlx::PgPool;

use sagedo_core::types::DbId;

use crate::models::service::{CreateService, Service, UpdateService};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, price, category, image_url, \
                        is_golden_eligible, delivery_time, click_count, created_at";

/// Provides CRUD operations for catalog services.
pub struct ServiceRepo;

impl ServiceRepo {
    /// Insert a new catalog item, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateService) -> Result<Service, sqlx::Error> {
        let query = format!(
            "INSERT INTO services
                (name, description, price, category, image_url, is_golden_eligible, delivery_time)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.category)
            .bind(&input.image_url)
            .bind(input.is_golden_eligible)
            .bind(&input.delivery_time)
            .fetch_one(pool)
            .await
    }

    /// Find a catalog item by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the whole catalog grouped by category.
    pub async fn list(pool: &PgPool) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services ORDER BY category, name");
        sqlx::query_as::<_, Service>(&query).fetch_all(pool).await
    }

    /// Update a catalog item. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateService,
    ) -> Result<Option<Service>, sqlx::Error> {
        let query = format!(
            "UPDATE services SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                category = COALESCE($5, category),
                image_url = COALESCE($6, image_url),
                is_golden_eligible = COALESCE($7, is_golden_eligible),
                delivery_time = COALESCE($8, delivery_time)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.category)
            .bind(&input.image_url)
            .bind(input.is_golden_eligible)
            .bind(&input.delivery_time)
            .fetch_optional(pool)
            .await
    }

    /// Delete a catalog item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment the click counter. Returns `true` if the service exists.
    pub async fn increment_click(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE services SET click_count = click_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The most clicked services (admin stats).
    pub async fn most_clicked(pool: &PgPool, limit: i64) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM services ORDER BY click_count DESC LIMIT $1"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
