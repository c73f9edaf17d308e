pub mod admin;
pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod feedback;
pub mod gallery;
pub mod health;
pub mod onboarding;
pub mod orders;
pub mod payment;
pub mod services;
pub mod tokens;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                              WebSocket (optional ?token=)
///
/// /auth/register                   register (public)
/// /auth/login                      login (public)
/// /auth/refresh                    refresh (public)
/// /auth/logout                     logout (requires auth)
/// /auth/me                         profile (requires auth)
///
/// /dashboard/profile               profile + retroactive welcome bonus
/// /dashboard/orders                orders with unread activity counts
///
/// /onboarding/survey               submit survey, one-time reward (POST)
///
/// /tokens/earn                     claim referral / daily-login reward (POST)
/// /tokens/transactions             ledger history (GET)
///
/// /services                        catalog list (public)
/// /services/{id}                   catalog item (public)
/// /services/{id}/click             record interest (POST, public)
///
/// /orders                          place order (POST)
/// /orders/{id}                     order detail (owner or admin)
/// /orders/{id}/activities          activity feed
/// /orders/{id}/activities/read     clear unread badge (POST)
///
/// /payment/create                  create gateway order (POST)
/// /payment/verify                  verify signature, capture (POST)
///
/// /feedback                        submit feedback (POST, public)
///
/// /gallery                         visible gallery entries (public)
///
/// /analytics/track-visit           log page view (POST, public)
///
/// /admin/orders                    all orders (admin)
/// /admin/orders/{id}/status        advance status (PATCH, admin)
/// /admin/stats                     dashboard rollup (admin)
/// /admin/feedback                  all feedback (admin)
/// /admin/services                  catalog create (POST, admin)
/// /admin/services/{id}             catalog update / delete (admin)
/// /admin/gallery                   gallery list / create (admin)
/// /admin/gallery/{id}              gallery update (PATCH, admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket endpoint for real-time notifications.
        .route("/ws", get(ws::ws_handler))
        // Authentication (register, login, refresh, logout, me).
        .nest("/auth", auth::router())
        // Customer dashboard.
        .nest("/dashboard", dashboard::router())
        // Onboarding survey.
        .nest("/onboarding", onboarding::router())
        // Token rewards and ledger.
        .nest("/tokens", tokens::router())
        // Public service catalog.
        .nest("/services", services::router())
        // Order placement and tracking.
        .nest("/orders", orders::router())
        // Gateway checkout.
        .nest("/payment", payment::router())
        // Public feedback.
        .nest("/feedback", feedback::router())
        // Public gallery.
        .nest("/gallery", gallery::router())
        // Visit analytics.
        .nest("/analytics", analytics::router())
        // Admin console (orders, stats, catalog, gallery).
        .nest("/admin", admin::router())
}
