use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::server::util::snowflake;

/// Location of the announcement posted for a leave record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageLink {
    #[serde(with = "snowflake")]
    pub channel_id: u64,
    #[serde(with = "snowflake")]
    pub message_id: u64,
    pub created_at: DateTime<Utc>,
}

/// Contents of the message link collection, keyed by leave record ID.
pub type MessageLinkMap = BTreeMap<String, MessageLink>;
