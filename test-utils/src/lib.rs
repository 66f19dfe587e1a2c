//! Staffdesk Test Utils
//!
//! Provides shared testing utilities for building integration and unit tests for the staffdesk
//! application. This crate offers a builder pattern for creating test contexts backed by a
//! temporary data directory, plus factories that write records in the on-disk JSON formats.
//!
//! # Overview
//!
//! The test utilities consist of three main components:
//! - **TestBuilder**: Fluent builder for seeding collections before a test runs
//! - **TestContext**: Test environment owning the temporary data directory and session
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_leave_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_default_role_config()
//!         .build()
//!         .await?;
//!
//!     let store = JsonStore::open(test.data_dir()).await?;
//!     // Perform store operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod collection;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
