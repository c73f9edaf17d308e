//! Repository for the `orders` table.

use sqlx::{PgExecutor, PgPool};

use sagedo_core::types::DbId;

use crate::models::order::{CreateOrder, Order};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, service_id, service_name, customer_email, customer_name, \
                        requirements, file_urls, status, paid_with_tokens, paid_with_golden, \
                        amount_paid, payment_id, payment_status, delivery_notes, delivered_at, \
                        created_at, updated_at";

/// Provides CRUD operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert a new order, returning the created row.
    ///
    /// Takes an executor so order creation can share a transaction with
    /// the token spend / golden-ticket consumption.
    pub async fn create<'e, E>(executor: E, input: &CreateOrder) -> Result<Order, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO orders
                (user_id, service_id, service_name, customer_email, customer_name,
                 requirements, file_urls, paid_with_tokens, paid_with_golden, amount_paid)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(input.user_id)
            .bind(input.service_id)
            .bind(&input.service_name)
            .bind(&input.customer_email)
            .bind(&input.customer_name)
            .bind(&input.requirements)
            .bind(&input.file_urls)
            .bind(input.paid_with_tokens)
            .bind(input.paid_with_golden)
            .bind(input.amount_paid)
            .fetch_one(executor)
            .await
    }

    /// Find an order by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's orders, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List all orders, newest first (admin view).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders ORDER BY created_at DESC");
        sqlx::query_as::<_, Order>(&query).fetch_all(pool).await
    }

    /// Apply an admin status update.
    ///
    /// Sets `delivered_at` exactly when the status becomes `delivered`;
    /// delivery notes are kept unless replaced, delivery files are
    /// appended. Transition legality is checked by the caller
    /// against `OrderStatus::can_transition_to`.
    pub async fn update_status<'e, E>(
        executor: E,
        id: DbId,
        status: &str,
        delivery_notes: Option<&str>,
        delivery_file_urls: Option<&[String]>,
    ) -> Result<Option<Order>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE orders SET
                status = $2,
                delivery_notes = COALESCE($3, delivery_notes),
                file_urls = file_urls || COALESCE($4, '{{}}'),
                delivered_at = CASE WHEN $2 = 'delivered' THEN NOW() ELSE delivered_at END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(status)
            .bind(delivery_notes)
            .bind(delivery_file_urls)
            .fetch_optional(executor)
            .await
    }

    /// Record a captured gateway payment against an order.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn mark_paid(
        pool: &PgPool,
        id: DbId,
        payment_id: &str,
        amount_paid: i32,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET
                payment_status = 'paid',
                payment_id = $2,
                amount_paid = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(payment_id)
            .bind(amount_paid)
            .fetch_optional(pool)
            .await
    }

    /// Record a failed gateway payment attempt.
    pub async fn mark_payment_failed(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE orders SET payment_status = 'failed', updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
