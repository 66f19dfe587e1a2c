use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The logged-in dashboard user.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub discord_id: String,
    pub name: String,
    pub role: String,
    pub permissions: Vec<String>,
}

/// One entry of the dashboard role map.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleDto {
    pub user_id: String,
    pub username: Option<String>,
    pub role: String,
    pub permissions: Vec<String>,
    pub assigned_at: DateTime<Utc>,
}

/// Body of `PUT /api/user-roles/{user_id}`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UpdateUserRoleDto {
    pub role: String,
}
