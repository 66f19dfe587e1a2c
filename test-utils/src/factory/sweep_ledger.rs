//! Expiry sweep ledger factory.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::{collection, context::TestContext, error::TestError};

/// Records that a requester was already notified about an expired record.
pub fn create_ledger_entry(
    ctx: &TestContext,
    user_id: u64,
    leave_id: &str,
    swept_at: DateTime<Utc>,
) -> Result<Value, TestError> {
    let value = json!({
        "userId": user_id.to_string(),
        "leaveId": leave_id,
        "sweptAt": swept_at.to_rfc3339(),
    });

    ctx.append_to_collection(collection::SWEEP_LEDGER, value.clone())?;

    Ok(value)
}
