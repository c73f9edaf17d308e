//! Real-time notification routing from platform events to WebSocket clients.

mod router;

pub use router::NotificationRouter;
