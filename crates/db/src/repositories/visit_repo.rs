//! Repository for the `site_visits` table and the admin stats rollup.

use serde::Serialize;
use sqlx::PgPool;

use crate::models::service::Service;
use crate::models::site_visit::{CreateSiteVisit, SiteVisit};
use crate::models::user::UserSummary;
use crate::repositories::{ServiceRepo, UserRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, path, referrer, user_agent, ip_address, visited_at";

/// Aggregate stats for the admin dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_users: i64,
    pub today_signups: i64,
    pub total_visits: i64,
    pub most_clicked_services: Vec<Service>,
    pub recent_visitors: Vec<SiteVisit>,
    pub recent_signups: Vec<UserSummary>,
}

/// Provides visit logging and dashboard aggregation.
pub struct VisitRepo;

impl VisitRepo {
    /// Log a site visit.
    pub async fn create(pool: &PgPool, input: &CreateSiteVisit) -> Result<SiteVisit, sqlx::Error> {
        let query = format!(
            "INSERT INTO site_visits (path, referrer, user_agent, ip_address)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteVisit>(&query)
            .bind(&input.path)
            .bind(&input.referrer)
            .bind(&input.user_agent)
            .bind(&input.ip_address)
            .fetch_one(pool)
            .await
    }

    /// Count all logged visits.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM site_visits")
            .fetch_one(pool)
            .await
    }

    /// The most recent visits, newest first.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<SiteVisit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM site_visits ORDER BY visited_at DESC LIMIT $1"
        );
        sqlx::query_as::<_, SiteVisit>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Assemble the admin dashboard rollup.
    pub async fn dashboard_stats(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        let today = chrono::Utc::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always valid")
            .and_utc();

        Ok(DashboardStats {
            total_users: UserRepo::count(pool).await?,
            today_signups: UserRepo::count_since(pool, today).await?,
            total_visits: Self::count(pool).await?,
            most_clicked_services: ServiceRepo::most_clicked(pool, 5).await?,
            recent_visitors: Self::recent(pool, 10).await?,
            recent_signups: UserRepo::recent_signups(pool, 10).await?,
        })
    }
}
