//! HTTP handlers, grouped by resource.

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod feedback;
pub mod gallery;
pub mod onboarding;
pub mod orders;
pub mod payment;
pub mod services;
pub mod tokens;
