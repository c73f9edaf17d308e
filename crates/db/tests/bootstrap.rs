use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    sagedo_db::health_check(&pool).await.unwrap();

    // Verify all core tables exist.
    let tables = [
        "users",
        "user_sessions",
        "services",
        "orders",
        "order_activities",
        "token_transactions",
        "feedback",
        "gallery",
        "site_visits",
        "events",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should exist and start empty");
    }
}

/// The non-negative balance constraint rejects direct negative writes.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_balance_check_constraint(pool: PgPool) {
    let result = sqlx::query(
        "INSERT INTO users (email, password_hash, name, token_balance)
         VALUES ('a@b.c', 'x', 'A', -1)",
    )
    .execute(&pool)
    .await;
    assert!(result.is_err());
}
