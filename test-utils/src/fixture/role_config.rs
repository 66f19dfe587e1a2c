use serde_json::{json, Value};

use super::discord::*;

/// Role configuration with every role and channel set to the fixture identifiers.
pub fn value() -> Value {
    json!({
        "staffRoleId": STAFF_ROLE_ID.to_string(),
        "leaveRoleId": LEAVE_ROLE_ID.to_string(),
        "leaveChannelId": LEAVE_CHANNEL_ID.to_string(),
        "staffChannelId": STAFF_CHANNEL_ID.to_string(),
        "approverRoleIds": [APPROVER_ROLE_ID.to_string()],
        "pingRoleIds": [PING_ROLE_ID.to_string()],
        "adminUserIds": [ADMIN_USER_ID.to_string()],
    })
}

/// Role configuration without a leave role, so approvals grant nothing.
pub fn without_leave_role() -> Value {
    let mut value = value();
    if let Some(map) = value.as_object_mut() {
        map.remove("leaveRoleId");
    }
    value
}
