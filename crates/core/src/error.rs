//! Domain-level error taxonomy shared across crates.

use crate::types::DbId;

/// Domain errors produced by business logic and repositories.
///
/// The API layer maps each variant to an HTTP status and a stable error
/// code; see `sagedo_api::error::AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup came up empty.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity kind, e.g. `"Order"`.
        entity: &'static str,
        id: DbId,
    },

    /// Input failed domain validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation conflicts with current state (duplicate, illegal
    /// status transition, already-consumed one-shot benefit).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A token spend exceeded the user's balance.
    #[error("Insufficient tokens: required {required}, available {available}")]
    InsufficientTokens { required: i32, available: i32 },

    /// Anything unexpected. The message is logged but never leaked to
    /// API clients.
    #[error("Internal error: {0}")]
    Internal(String),
}
