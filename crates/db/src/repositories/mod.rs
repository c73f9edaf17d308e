//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Read methods take `&PgPool`; write methods that participate in
//! multi-statement transactions take `impl PgExecutor` so handlers can
//! compose them inside a single `pool.begin()` scope.

pub mod event_repo;
pub mod feedback_repo;
pub mod gallery_repo;
pub mod order_activity_repo;
pub mod order_repo;
pub mod service_repo;
pub mod session_repo;
pub mod token_repo;
pub mod user_repo;
pub mod visit_repo;

pub use event_repo::EventRepo;
pub use feedback_repo::FeedbackRepo;
pub use gallery_repo::GalleryRepo;
pub use order_activity_repo::OrderActivityRepo;
pub use order_repo::OrderRepo;
pub use service_repo::ServiceRepo;
pub use session_repo::SessionRepo;
pub use token_repo::{LedgerResult, TokenRepo};
pub use user_repo::UserRepo;
pub use visit_repo::{DashboardStats, VisitRepo};
