//! Repository for the `gallery` table.

use sqlx::PgPool;

use sagedo_core::types::DbId;

use crate::models::gallery::{CreateGalleryItem, GalleryItem, UpdateGalleryItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, kind, title, content, image_url, client_name, client_role, \
                        rating, is_visible, created_at";

/// Provides CRUD operations for gallery entries.
pub struct GalleryRepo;

impl GalleryRepo {
    /// Insert a gallery entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGalleryItem,
    ) -> Result<GalleryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO gallery
                (kind, title, content, image_url, client_name, client_role, rating, is_visible)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(&input.kind)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.image_url)
            .bind(&input.client_name)
            .bind(&input.client_role)
            .bind(input.rating)
            .bind(input.is_visible)
            .fetch_one(pool)
            .await
    }

    /// List publicly visible entries, newest first.
    pub async fn list_visible(pool: &PgPool) -> Result<Vec<GalleryItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gallery WHERE is_visible = true ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .fetch_all(pool)
            .await
    }

    /// List all entries including hidden ones (admin view).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<GalleryItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gallery ORDER BY created_at DESC");
        sqlx::query_as::<_, GalleryItem>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update an entry. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGalleryItem,
    ) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query = format!(
            "UPDATE gallery SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                image_url = COALESCE($4, image_url),
                client_name = COALESCE($5, client_name),
                client_role = COALESCE($6, client_role),
                rating = COALESCE($7, rating),
                is_visible = COALESCE($8, is_visible)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.image_url)
            .bind(&input.client_name)
            .bind(&input.client_role)
            .bind(input.rating)
            .bind(input.is_visible)
            .fetch_optional(pool)
            .await
    }
}
