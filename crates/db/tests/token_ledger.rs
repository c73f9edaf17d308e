//! Ledger integrity tests: the balance always equals the sum of entries,
//! and spends can never overdraw.

use assert_matches::assert_matches;
use sqlx::PgPool;

use sagedo_core::types::DbId;
use sagedo_db::models::token_transaction::CreateTokenTransaction;
use sagedo_db::models::user::CreateUser;
use sagedo_db::repositories::{LedgerResult, TokenRepo, UserRepo};

async fn create_user(pool: &PgPool, email: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            name: "Test User".to_string(),
            is_admin: false,
        },
    )
    .await
    .unwrap()
    .id
}

fn entry(user_id: DbId, amount: i32, reason: &str, description: &str) -> CreateTokenTransaction {
    CreateTokenTransaction {
        user_id,
        amount,
        reason: reason.to_string(),
        description: description.to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_credit_updates_balance(pool: PgPool) {
    let user_id = create_user(&pool, "credit@test.com").await;

    let result = TokenRepo::apply(&pool, &entry(user_id, 150, "welcome", "Welcome bonus"))
        .await
        .unwrap();

    assert_matches!(
        result,
        LedgerResult::Applied { new_balance: 150, .. }
    );

    let user = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(user.token_balance, 150);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_spend_rejected_when_insufficient(pool: PgPool) {
    let user_id = create_user(&pool, "poor@test.com").await;

    TokenRepo::apply(&pool, &entry(user_id, 50, "survey", "Survey reward"))
        .await
        .unwrap();

    let result = TokenRepo::apply(&pool, &entry(user_id, -100, "spend", "Order: Logo"))
        .await
        .unwrap();
    assert_matches!(result, LedgerResult::InsufficientBalance { available: 50 });

    // Nothing was written: balance and ledger untouched.
    let user = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(user.token_balance, 50);
    assert_eq!(TokenRepo::ledger_sum(&pool, user_id).await.unwrap(), 50);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_balance_equals_ledger_sum(pool: PgPool) {
    let user_id = create_user(&pool, "ledger@test.com").await;

    for (amount, reason, desc) in [
        (150, "welcome", "Welcome bonus"),
        (100, "referral", "Referral: friend@test.com"),
        (10, "daily_login", "Daily login reward"),
        (-200, "spend", "Order: Website"),
        (10, "daily_login", "Daily login reward"),
    ] {
        let result = TokenRepo::apply(&pool, &entry(user_id, amount, reason, desc))
            .await
            .unwrap();
        assert_matches!(result, LedgerResult::Applied { .. });
    }

    let user = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    let sum = TokenRepo::ledger_sum(&pool, user_id).await.unwrap();
    assert_eq!(user.token_balance as i64, sum);
    assert_eq!(sum, 70);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_spend_to_exactly_zero_is_allowed(pool: PgPool) {
    let user_id = create_user(&pool, "zero@test.com").await;

    TokenRepo::apply(&pool, &entry(user_id, 100, "referral", "Referral: x@y.z"))
        .await
        .unwrap();
    let result = TokenRepo::apply(&pool, &entry(user_id, -100, "spend", "Order: Poster"))
        .await
        .unwrap();

    assert_matches!(result, LedgerResult::Applied { new_balance: 0, .. });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_referral_dedupe_is_case_insensitive(pool: PgPool) {
    let user_id = create_user(&pool, "referrer@test.com").await;

    TokenRepo::apply(
        &pool,
        &entry(user_id, 100, "referral", "Referral: friend@example.com"),
    )
    .await
    .unwrap();

    assert!(
        TokenRepo::referral_exists(&pool, user_id, "Friend@Example.com")
            .await
            .unwrap()
    );
    assert!(
        !TokenRepo::referral_exists(&pool, user_id, "other@example.com")
            .await
            .unwrap()
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_last_by_reason_returns_newest(pool: PgPool) {
    let user_id = create_user(&pool, "daily@test.com").await;

    assert!(TokenRepo::last_by_reason(&pool, user_id, "daily_login")
        .await
        .unwrap()
        .is_none());

    TokenRepo::apply(&pool, &entry(user_id, 10, "daily_login", "Daily login reward"))
        .await
        .unwrap();

    let last = TokenRepo::last_by_reason(&pool, user_id, "daily_login")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(last.amount, 10);
    assert_eq!(last.reason, "daily_login");
}
