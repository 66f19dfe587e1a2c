//! File names of the JSON collections inside a data directory.
//!
//! Kept in sync with `server::data::store::Collection` in the main crate; the factories write
//! these files directly so tests exercise the same on-disk format the application reads.

pub const ACTIVE_LEAVES: &str = "active-loas.json";
pub const LEAVE_HISTORY: &str = "loa-history.json";
pub const MESSAGE_LINKS: &str = "loa-message-map.json";
pub const ROLE_CONFIG: &str = "staff-config.json";
pub const USER_PERMISSIONS: &str = "user-roles.json";
pub const NOTIFICATIONS: &str = "ipc-messages.json";
pub const SWEEP_LEDGER: &str = "notified-loas.json";
