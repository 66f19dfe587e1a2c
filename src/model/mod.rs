//! Data transfer objects exchanged with dashboard clients.
//!
//! These types define the JSON shapes of the REST and WebSocket API. Server-side domain
//! models convert into them via `into_dto`/`to_dto`; Discord snowflakes travel as strings.

pub mod api;
pub mod config;
pub mod leave;
pub mod stats;
pub mod user;
