//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod feedback;
pub mod gallery;
pub mod order;
pub mod order_activity;
pub mod service;
pub mod session;
pub mod site_visit;
pub mod token_transaction;
pub mod user;
