//! HTTP-level integration tests for the public surface (catalog, feedback,
//! gallery, analytics) and the admin content endpoints.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{body_json, delete_auth, get, get_auth, patch_json_auth, post_json, post_json_auth};
use sqlx::PgPool;
use tower::ServiceExt;

use sagedo_db::models::gallery::CreateGalleryItem;
use sagedo_db::models::user::CreateUser;
use sagedo_db::repositories::{GalleryRepo, UserRepo};

/// Create an admin account directly and log in; returns their access token.
async fn login_admin(pool: &PgPool, email: &str) -> String {
    let hash = sagedo_api::auth::password::hash_password("adminpass1").unwrap();
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: hash,
            name: "Admin".to_string(),
            is_admin: true,
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "email": email, "password": "adminpass1" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Register a customer via the API; returns their access token.
async fn register_customer(pool: &PgPool, email: &str) -> String {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "email": email,
        "password": "password1",
        "name": "Test Customer",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["access_token"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// The health endpoint reports database status and optional integrations.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["payments_enabled"], false);
    assert_eq!(json["ws_connections"], 0);

    // With gateway credentials configured, payments report enabled.
    let app = common::build_test_app_with_payment(pool);
    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["payments_enabled"], true);
}

// ---------------------------------------------------------------------------
// Service catalog
// ---------------------------------------------------------------------------

/// Admins create catalog entries; the public list serves them.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_catalog_create_and_list(pool: PgPool) {
    let admin = login_admin(&pool, "admin@test.com").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "name": "Logo Design",
        "description": "A distinctive brand mark",
        "price": 499,
        "category": "design",
        "is_golden_eligible": true,
        "delivery_time": "3 days",
    });
    let response = post_json_auth(app, "/api/v1/admin/services", body, &admin).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let service_id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["click_count"], 0);

    // Public list needs no token.
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/services").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/services/{service_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Logo Design");
}

/// Clicks bump the popularity counter; unknown IDs are 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_catalog_click_tracking(pool: PgPool) {
    let admin = login_admin(&pool, "admin@test.com").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "name": "Poster",
        "description": "Event poster",
        "price": 199,
        "category": "design",
    });
    let response = post_json_auth(app, "/api/v1/admin/services", body, &admin).await;
    let service_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    for _ in 0..3 {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            &format!("/api/v1/services/{service_id}/click"),
            serde_json::json!({}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/services/{service_id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["click_count"], 3);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/services/9999/click", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Catalog updates patch only the provided fields; deletes remove the row.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_catalog_update_and_delete(pool: PgPool) {
    let admin = login_admin(&pool, "admin@test.com").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "name": "Flyer",
        "description": "Single page flyer",
        "price": 99,
        "category": "design",
    });
    let response = post_json_auth(app, "/api/v1/admin/services", body, &admin).await;
    let service_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/admin/services/{service_id}"),
        serde_json::json!({ "price": 149 }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["price"], 149);
    assert_eq!(json["data"]["name"], "Flyer");

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/admin/services/{service_id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/services/{service_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Negative prices are rejected at both create and update.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_catalog_rejects_negative_price(pool: PgPool) {
    let admin = login_admin(&pool, "admin@test.com").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Broken",
        "description": "Bad price",
        "price": -1,
        "category": "design",
    });
    let response = post_json_auth(app, "/api/v1/admin/services", body, &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Catalog mutations require the admin flag.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_catalog_mutation_requires_admin(pool: PgPool) {
    let customer = register_customer(&pool, "plain@test.com").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Sneaky",
        "description": "Not allowed",
        "price": 1,
        "category": "design",
    });
    let response = post_json_auth(app, "/api/v1/admin/services", body, &customer).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

/// Feedback works anonymously and links to the account when a token is sent.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_feedback_anonymous_and_authenticated(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "name": "Visitor",
        "rating": 4,
        "message": "Great landing page",
        "page": "/",
    });
    let response = post_json(app, "/api/v1/feedback", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["data"]["user_id"].is_null());

    let token = register_customer(&pool, "fan@test.com").await;
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "rating": 5, "message": "Loved the delivery speed" });
    let response = post_json_auth(app, "/api/v1/feedback", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["data"]["user_id"].is_i64());

    // Admins see both entries, newest first.
    let admin = login_admin(&pool, "admin@test.com").await;
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/feedback", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["rating"], 5);
}

/// Out-of-range ratings and empty messages are rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_feedback_validation(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "rating": 6, "message": "Too many stars" });
    let response = post_json(app, "/api/v1/feedback", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "rating": 3, "message": "" });
    let response = post_json(app, "/api/v1/feedback", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

/// The public gallery hides invisible entries; the admin list shows all.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_gallery_visibility(pool: PgPool) {
    GalleryRepo::create(
        &pool,
        &CreateGalleryItem {
            kind: "testimonial".to_string(),
            title: None,
            content: Some("Fantastic work".to_string()),
            image_url: None,
            client_name: Some("Asha".to_string()),
            client_role: Some("Founder".to_string()),
            rating: Some(5),
            is_visible: true,
        },
    )
    .await
    .unwrap();
    GalleryRepo::create(
        &pool,
        &CreateGalleryItem {
            kind: "work_showcase".to_string(),
            title: Some("Brand refresh".to_string()),
            content: None,
            image_url: Some("https://cdn.test/brand.png".to_string()),
            client_name: None,
            client_role: None,
            rating: None,
            is_visible: false,
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/gallery").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["kind"], "testimonial");

    let admin = login_admin(&pool, "admin@test.com").await;
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/gallery", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

/// Admins create entries and toggle visibility; bad kinds are rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_gallery_admin_create_and_update(pool: PgPool) {
    let admin = login_admin(&pool, "admin@test.com").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "kind": "testimonial",
        "content": "Delivered ahead of schedule",
        "client_name": "Ravi",
        "rating": 5,
    });
    let response = post_json_auth(app, "/api/v1/admin/gallery", body, &admin).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let item_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/admin/gallery/{item_id}"),
        serde_json::json!({ "is_visible": false }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_visible"], false);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "kind": "banner", "content": "Nope" });
    let response = post_json_auth(app, "/api/v1/admin/gallery", body, &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

/// Visit tracking captures header metadata and feeds the stats rollup.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_track_visit_and_stats(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "path": "/services", "referrer": "https://google.com" });
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/analytics/track-visit")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::USER_AGENT, "integration-test/1.0")
        .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (path, ip): (String, Option<String>) =
        sqlx::query_as("SELECT path, ip_address FROM site_visits")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(path, "/services");
    // Only the first X-Forwarded-For hop is recorded.
    assert_eq!(ip.as_deref(), Some("203.0.113.7"));

    let admin = login_admin(&pool, "admin@test.com").await;
    register_customer(&pool, "signup@test.com").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/stats", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total_visits"], 1);
    assert_eq!(json["data"]["total_users"], 2);
    assert_eq!(json["data"]["recent_visitors"].as_array().unwrap().len(), 1);
}

/// An empty path is a validation error.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_track_visit_requires_path(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "path": "" });
    let response = post_json(app, "/api/v1/analytics/track-visit", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
