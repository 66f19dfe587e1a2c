//! Small shared helpers: parsing, identifier generation and serde adapters.

pub mod id;
pub mod parse;
pub mod snowflake;
