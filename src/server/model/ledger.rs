use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::server::util::snowflake;

/// Marks that the expiry of one record has been handled and its requester notified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepLedgerEntry {
    #[serde(with = "snowflake")]
    pub user_id: u64,
    pub leave_id: String,
    pub swept_at: DateTime<Utc>,
}

impl SweepLedgerEntry {
    pub fn matches(&self, user_id: u64, leave_id: &str) -> bool {
        self.user_id == user_id && self.leave_id == leave_id
    }
}
