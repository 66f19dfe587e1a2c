use serde::{Deserialize, Serialize};

use crate::{
    model::config::RoleConfigDto,
    server::{
        error::AppError,
        util::{parse::parse_discord_id, snowflake},
    },
};

/// Process-wide mapping of logical roles and channels to Discord identifiers.
///
/// Every entry is optional; effects needing a missing entry are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleConfig {
    /// Role required to file leave requests. When unset anyone may file.
    #[serde(default, with = "snowflake::option", skip_serializing_if = "Option::is_none")]
    pub staff_role_id: Option<u64>,
    /// Role granted for the duration of an approved leave.
    #[serde(default, with = "snowflake::option", skip_serializing_if = "Option::is_none")]
    pub leave_role_id: Option<u64>,
    /// Channel receiving leave announcements with decision buttons.
    #[serde(default, with = "snowflake::option", skip_serializing_if = "Option::is_none")]
    pub leave_channel_id: Option<u64>,
    /// Channel receiving "back from leave" announcements.
    #[serde(default, with = "snowflake::option", skip_serializing_if = "Option::is_none")]
    pub staff_channel_id: Option<u64>,
    /// Roles allowed to approve, deny, request changes and delete.
    #[serde(default, with = "snowflake::list")]
    pub approver_role_ids: Vec<u64>,
    /// Roles mentioned on new announcements.
    #[serde(default, with = "snowflake::list")]
    pub ping_role_ids: Vec<u64>,
    /// Users who receive a DM about new requests and extensions.
    #[serde(default, with = "snowflake::list")]
    pub admin_user_ids: Vec<u64>,
}

impl RoleConfig {
    pub fn into_dto(self) -> RoleConfigDto {
        let ids = |ids: Vec<u64>| ids.into_iter().map(|id| id.to_string()).collect();

        RoleConfigDto {
            staff_role_id: self.staff_role_id.map(|id| id.to_string()),
            leave_role_id: self.leave_role_id.map(|id| id.to_string()),
            leave_channel_id: self.leave_channel_id.map(|id| id.to_string()),
            staff_channel_id: self.staff_channel_id.map(|id| id.to_string()),
            approver_role_ids: ids(self.approver_role_ids),
            ping_role_ids: ids(self.ping_role_ids),
            admin_user_ids: ids(self.admin_user_ids),
        }
    }

    /// Parses a dashboard submission.
    ///
    /// Blank optional entries clear the setting; every present entry must be a valid ID.
    ///
    /// # Returns
    /// - `Ok(RoleConfig)` - All identifiers parsed
    /// - `Err(AppError::BadRequest)` - At least one identifier is malformed
    pub fn from_dto(dto: RoleConfigDto) -> Result<Self, AppError> {
        fn optional(value: Option<String>) -> Result<Option<u64>, AppError> {
            match value {
                Some(value) if !value.trim().is_empty() => parse_discord_id(&value).map(Some),
                _ => Ok(None),
            }
        }

        fn list(values: Vec<String>) -> Result<Vec<u64>, AppError> {
            values
                .iter()
                .filter(|value| !value.trim().is_empty())
                .map(|value| parse_discord_id(value))
                .collect()
        }

        Ok(Self {
            staff_role_id: optional(dto.staff_role_id)?,
            leave_role_id: optional(dto.leave_role_id)?,
            leave_channel_id: optional(dto.leave_channel_id)?,
            staff_channel_id: optional(dto.staff_channel_id)?,
            approver_role_ids: list(dto.approver_role_ids)?,
            ping_role_ids: list(dto.ping_role_ids)?,
            admin_user_ids: list(dto.admin_user_ids)?,
        })
    }
}
