//! Factory methods for creating test data.
//!
//! Factories write records straight into the collection files of a `TestContext`, in the
//! same JSON shape the application persists. Each factory has a builder struct for
//! customization and a `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let record = factory::leave_record::create_leave_record(&test)?;
//!
//! let approved = factory::leave_record::LeaveRecordFactory::new(&test)
//!     .requester(fixture::discord::REQUESTER_ID, "Requester")
//!     .approved_by(fixture::discord::APPROVER_ID)
//!     .granted_role(fixture::discord::LEAVE_ROLE_ID)
//!     .build()?;
//! ```
//!
//! # Available Factories
//!
//! - `leave_record` - Active or archived leave records
//! - `envelope` - Notification queue envelopes
//! - `role_config` - The role configuration singleton
//! - `user_role` - Dashboard role assignments
//! - `message_link` - Announcement message links
//! - `sweep_ledger` - Expiry sweep ledger entries
//! - `helpers` - Shared id generation

pub mod envelope;
pub mod helpers;
pub mod leave_record;
pub mod message_link;
pub mod role_config;
pub mod sweep_ledger;
pub mod user_role;

pub use envelope::create_envelope;
pub use leave_record::{create_approved_leave, create_leave_record};
pub use message_link::create_message_link;
pub use sweep_ledger::create_ledger_entry;
pub use user_role::create_user_role;
