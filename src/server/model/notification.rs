use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::server::util::id::envelope_id;

/// Envelope types exchanged between the bot and the dashboard.
pub mod kind {
    /// A `LeaveEvent` whose platform effects the bot must apply.
    pub const LEAVE_EFFECT: &str = "loa_effect";
    /// A record transition to push to live dashboard clients.
    pub const LEAVE_STATUS_UPDATE: &str = "loa_status_update";
    /// Fresh bot statistics.
    pub const BOT_STATS_UPDATE: &str = "bot_stats_update";
}

/// One entry of the notification queue log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub processed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
}

impl Envelope {
    /// Creates an unprocessed envelope with a fresh id.
    pub fn new(kind: &str, payload: Value, now: DateTime<Utc>) -> Self {
        Self {
            id: envelope_id(now),
            kind: kind.to_string(),
            payload,
            created_at: now,
            processed: false,
            processed_at: None,
        }
    }

    /// Deserializes the payload into the type its envelope kind implies.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}
