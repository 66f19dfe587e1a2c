use serde::{Deserialize, Serialize};

/// Role configuration as shown and edited in the dashboard.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RoleConfigDto {
    #[serde(default)]
    pub staff_role_id: Option<String>,
    #[serde(default)]
    pub leave_role_id: Option<String>,
    #[serde(default)]
    pub leave_channel_id: Option<String>,
    #[serde(default)]
    pub staff_channel_id: Option<String>,
    #[serde(default)]
    pub approver_role_ids: Vec<String>,
    #[serde(default)]
    pub ping_role_ids: Vec<String>,
    #[serde(default)]
    pub admin_user_ids: Vec<String>,
}
