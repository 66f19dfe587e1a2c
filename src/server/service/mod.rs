//! Service layer for business logic and orchestration.
//!
//! This module sits between the controller and bot layers and the data (repository) layer.
//! Services are responsible for:
//!
//! - **Leave workflow**: validating and committing every record transition, then producing
//!   its chat-side effects
//! - **Authorization**: the single policy function consulted by both inbound surfaces
//! - **Cross-process delivery**: the notification queue shared by the bot and the dashboard
//! - **Caching**: short-lived caches in front of the role configuration and user permissions

pub mod leave;
pub mod live;
pub mod notification;
pub mod oauth;
pub mod policy;
pub mod role_config;
pub mod stats;
pub mod user_permission;
