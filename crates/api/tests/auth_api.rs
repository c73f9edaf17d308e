//! HTTP-level integration tests for registration, login, refresh, and logout.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_json_auth};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Register a user via the API and return the JSON auth response.
async fn register_user(app: axum::Router, email: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({
        "email": email,
        "password": password,
        "name": "Test User",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registration returns tokens and grants the welcome bonus + golden ticket.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_grants_welcome_bonus(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = register_user(app, "new@test.com", "password1").await;

    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["user"]["email"], "new@test.com");
    assert_eq!(json["user"]["token_balance"], 150);
    assert_eq!(json["user"]["has_golden_ticket"], true);
    assert_eq!(json["user"]["is_admin"], false);
}

/// Registering the same email twice returns 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    register_user(app, "dup@test.com", "password1").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "email": "Dup@Test.com",
        "password": "password1",
        "name": "Other",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Weak passwords are rejected with 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_weak_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "weak@test.com",
        "password": "short1",
        "name": "Weak",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Malformed email is rejected with 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_invalid_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "not-an-email",
        "password": "password1",
        "name": "Bad Email",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login / refresh / logout
// ---------------------------------------------------------------------------

/// Login with correct credentials returns tokens.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    register_user(app, "login@test.com", "password1").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "login@test.com", "password": "password1" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["user"]["email"], "login@test.com");
}

/// Login is case-insensitive on email.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_email_case_insensitive(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    register_user(app, "case@test.com", "password1").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "CASE@TEST.COM", "password": "password1" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Wrong password returns 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    register_user(app, "wrongpw@test.com", "password1").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "wrongpw@test.com", "password": "incorrect1" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Nonexistent account returns 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "ghost@test.com", "password": "whatever1" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A valid refresh token returns new, rotated tokens.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_refresh_rotates(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let json = register_user(app, "refresh@test.com", "password1").await;
    let refresh_token = json["refresh_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_ne!(json["refresh_token"].as_str().unwrap(), refresh_token);

    // The old token is single-use: replaying it fails.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Refreshing with garbage returns 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_with_invalid_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": "not-a-real-token" });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes all sessions, killing the refresh token.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_revokes_sessions(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let json = register_user(app, "logout@test.com", "password1").await;
    let access_token = json["access_token"].as_str().unwrap().to_string();
    let refresh_token = json["refresh_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/auth/logout",
        serde_json::json!({}),
        &access_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// GET /auth/me returns the profile for a valid token.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let json = register_user(app, "me@test.com", "password1").await;
    let token = json["access_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "me@test.com");
    // The password hash never leaves the server.
    assert!(json["data"].get("password_hash").is_none());
}

/// Protected endpoints reject missing and malformed tokens.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = common::get(app, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/me", "garbage.token.here").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
