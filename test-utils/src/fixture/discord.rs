//! Fixed Discord snowflakes shared by the fixtures and factories.

pub const GUILD_ID: u64 = 900_000_000_000_000_001;

pub const STAFF_ROLE_ID: u64 = 910_000_000_000_000_001;
pub const LEAVE_ROLE_ID: u64 = 910_000_000_000_000_002;
pub const APPROVER_ROLE_ID: u64 = 910_000_000_000_000_003;
pub const PING_ROLE_ID: u64 = 910_000_000_000_000_004;

pub const LEAVE_CHANNEL_ID: u64 = 920_000_000_000_000_001;
pub const STAFF_CHANNEL_ID: u64 = 920_000_000_000_000_002;

/// Staff member who files leave requests in most tests.
pub const REQUESTER_ID: u64 = 930_000_000_000_000_001;
/// A second staff member, used for ownership checks.
pub const OTHER_STAFF_ID: u64 = 930_000_000_000_000_002;
/// Holder of the approver role.
pub const APPROVER_ID: u64 = 930_000_000_000_000_003;
/// A second approver, used for competing decisions.
pub const SECOND_APPROVER_ID: u64 = 930_000_000_000_000_004;
/// Configured administrator who receives leave notifications by DM.
pub const ADMIN_USER_ID: u64 = 930_000_000_000_000_005;
