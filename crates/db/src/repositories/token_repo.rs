//! Repository for the `token_transactions` ledger.
//!
//! Every balance change goes through [`TokenRepo::apply`] (or
//! [`TokenRepo::apply_in`] when composing with other writes): the ledger
//! insert and the `users.token_balance` update happen in one database
//! transaction, so the balance always equals the ledger sum
//! and a spend can never take the balance below zero.

use sqlx::{PgExecutor, PgPool, Postgres, Transaction};

use sagedo_core::types::DbId;

use crate::models::token_transaction::{CreateTokenTransaction, TokenTransaction};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, amount, reason, description, created_at";

/// Outcome of applying a ledger entry.
#[derive(Debug)]
pub enum LedgerResult {
    /// The entry was recorded and the balance updated.
    Applied {
        transaction: TokenTransaction,
        new_balance: i32,
    },
    /// A spend exceeded the available balance; nothing was written.
    InsufficientBalance { available: i32 },
}

/// Provides ledger operations for token transactions.
pub struct TokenRepo;

impl TokenRepo {
    /// Apply a ledger entry in its own transaction.
    ///
    /// Returns `sqlx::Error::RowNotFound` if the user does not exist.
    pub async fn apply(
        pool: &PgPool,
        input: &CreateTokenTransaction,
    ) -> Result<LedgerResult, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let result = Self::apply_in(&mut tx, input).await?;
        if matches!(result, LedgerResult::Applied { .. }) {
            tx.commit().await?;
        }
        Ok(result)
    }

    /// Apply a ledger entry inside an existing transaction.
    ///
    /// The caller is responsible for committing. On
    /// [`LedgerResult::InsufficientBalance`] no rows have been written and
    /// the caller should roll back (dropping the transaction suffices).
    pub async fn apply_in(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateTokenTransaction,
    ) -> Result<LedgerResult, sqlx::Error> {
        let balance = Self::lock_balance(tx, input.user_id).await?;

        if balance + input.amount < 0 {
            return Ok(LedgerResult::InsufficientBalance { available: balance });
        }

        let query = format!(
            "INSERT INTO token_transactions (user_id, amount, reason, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let transaction = sqlx::query_as::<_, TokenTransaction>(&query)
            .bind(input.user_id)
            .bind(input.amount)
            .bind(&input.reason)
            .bind(&input.description)
            .fetch_one(&mut **tx)
            .await?;

        let new_balance: i32 = sqlx::query_scalar(
            "UPDATE users SET token_balance = token_balance + $2, updated_at = NOW()
             WHERE id = $1
             RETURNING token_balance",
        )
        .bind(input.user_id)
        .bind(input.amount)
        .fetch_one(&mut **tx)
        .await?;

        Ok(LedgerResult::Applied {
            transaction,
            new_balance,
        })
    }

    /// Lock the user's balance row for the rest of the transaction.
    ///
    /// Concurrent earns and spends for the same user serialize on this
    /// lock, so eligibility checks made after it see every entry written
    /// by transactions that committed first. Returns the current balance.
    pub async fn lock_balance(
        tx: &mut Transaction<'_, Postgres>,
        user_id: DbId,
    ) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar("SELECT token_balance FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// List a user's ledger entries, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<TokenTransaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM token_transactions
             WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, TokenTransaction>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// The most recent entry with the given reason, if any.
    ///
    /// Takes an executor so the earn handler can run it inside the
    /// transaction holding the balance lock.
    pub async fn last_by_reason<'e, E>(
        executor: E,
        user_id: DbId,
        reason: &str,
    ) -> Result<Option<TokenTransaction>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM token_transactions
             WHERE user_id = $1 AND reason = $2
             ORDER BY created_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, TokenTransaction>(&query)
            .bind(user_id)
            .bind(reason)
            .fetch_optional(executor)
            .await
    }

    /// Whether a referral credit mentioning this email already exists.
    ///
    /// Referrals are stored with the referred email in the description, so
    /// a case-insensitive substring match is the dedupe key.
    pub async fn referral_exists<'e, E>(
        executor: E,
        user_id: DbId,
        referred_email: &str,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM token_transactions
             WHERE user_id = $1 AND reason = 'referral' AND description ILIKE $2",
        )
        .bind(user_id)
        .bind(format!("%{}%", referred_email.to_lowercase()))
        .fetch_one(executor)
        .await?;
        Ok(count > 0)
    }

    /// Sum of all ledger entries for a user (test / audit helper).
    pub async fn ledger_sum(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0) FROM token_transactions WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
