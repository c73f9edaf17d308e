//! Periodic background maintenance tasks.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use sagedo_db::repositories::SessionRepo;
use sagedo_db::DbPool;

/// Interval between expired-session sweeps (in seconds).
const SESSION_CLEANUP_INTERVAL_SECS: u64 = 3600;

/// Spawn a task that periodically deletes expired and revoked refresh
/// sessions.
///
/// The task runs until the cancellation token is triggered during shutdown.
pub fn start_session_cleanup(
    pool: DbPool,
    shutdown: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(Duration::from_secs(SESSION_CLEANUP_INTERVAL_SECS));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match SessionRepo::cleanup_expired(&pool).await {
                        Ok(deleted) if deleted > 0 => {
                            tracing::info!(deleted, "Cleaned up expired sessions");
                        }
                        Ok(_) => {}
                        Err(e) => {
                            tracing::error!(error = %e, "Session cleanup failed");
                        }
                    }
                }
                _ = shutdown.cancelled() => {
                    tracing::info!("Session cleanup task shutting down");
                    break;
                }
            }
        }
    })
}
