//! Announcement message link factory.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::{collection, context::TestContext, error::TestError};

/// Links a leave record id to a posted announcement.
pub fn create_message_link(
    ctx: &TestContext,
    leave_id: &str,
    channel_id: u64,
    message_id: u64,
    created_at: DateTime<Utc>,
) -> Result<Value, TestError> {
    let value = json!({
        "channelId": channel_id.to_string(),
        "messageId": message_id.to_string(),
        "createdAt": created_at.to_rfc3339(),
    });

    ctx.insert_into_collection(collection::MESSAGE_LINKS, leave_id, value.clone())?;

    Ok(value)
}
