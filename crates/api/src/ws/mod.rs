//! WebSocket infrastructure for real-time notifications.
//!
//! Browser clients connect to `/api/v1/ws`, optionally passing their access
//! token as a `?token=` query parameter to receive user-targeted messages.
//! Connection management, heartbeat, and the Axum upgrade handler live here.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
