//! Customer-facing delivery channels.

pub mod email;
