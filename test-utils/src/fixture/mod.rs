//! Test fixtures providing reusable test data without touching the data directory.
//!
//! Fixtures are fixed Discord identifiers, date helpers and raw JSON documents used as
//! defaults by the factories. Unlike factories, fixtures do NOT write any files.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let start = fixture::date::days_from_today(1);
//! let requester = fixture::discord::REQUESTER_ID;
//! ```

pub mod date;
pub mod discord;
pub mod role_config;
