//! WebSocket keepalive pings.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::ws::manager::WsManager;

/// Interval between keepalive pings (in seconds).
const HEARTBEAT_INTERVAL_SECS: u64 = 30;

/// Spawn a task that pings every connected client on a fixed interval.
///
/// Dead connections surface as send errors in their socket tasks and are
/// removed there. The task runs until the cancellation token fires during
/// shutdown.
pub fn start_heartbeat(
    ws_manager: Arc<WsManager>,
    shutdown: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let count = ws_manager.connection_count().await;
                    if count > 0 {
                        tracing::debug!(count, "WebSocket heartbeat ping");
                        ws_manager.ping_all().await;
                    }
                }
                _ = shutdown.cancelled() => {
                    tracing::info!("WebSocket heartbeat shutting down");
                    break;
                }
            }
        }
    })
}
