//! Shared domain types and logic for the SAGE DO backend.
//!
//! This crate holds everything the database and API layers agree on but
//! that does not itself touch the network or the database:
//!
//! - [`types`] -- common type aliases (`DbId`, `Timestamp`).
//! - [`error`] -- the domain error taxonomy ([`CoreError`](error::CoreError)).
//! - [`order`] -- order lifecycle and payment status state machines.
//! - [`tokens`] -- token-reward rules (amounts, reasons, eligibility).
//! - [`events`] -- well-known platform event name constants.

pub mod error;
pub mod events;
pub mod order;
pub mod tokens;
pub mod types;
