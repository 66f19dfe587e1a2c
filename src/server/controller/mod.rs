//! HTTP handlers of the dashboard API.
//!
//! Handlers resolve the session user through `AuthGuard`, convert DTOs into service
//! parameters and convert results back into DTOs.

pub mod auth;
pub mod config;
pub mod leave;
pub mod live;
pub mod stats;
pub mod user_role;
