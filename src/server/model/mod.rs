//! Domain models used by the service and data layers.
//!
//! These types are what the collection files contain and what the leave workflow passes
//! around. Conversion into API DTOs happens here via `to_dto`/`into_dto` so controllers
//! never touch persistence shapes directly.

pub mod actor;
pub mod event;
pub mod ledger;
pub mod leave;
pub mod message_link;
pub mod notification;
pub mod role_config;
pub mod stats;
pub mod user_permission;
