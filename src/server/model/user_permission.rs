use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

use crate::{model::user::UserRoleDto, server::util::snowflake};

/// Dashboard role of a user, ordered from least to most privileged.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DashboardRole {
    #[default]
    User,
    Moderator,
    Administrator,
    SuperAdmin,
}

/// Dashboard capabilities checked by `AuthGuard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    ConfigView,
    ConfigEdit,
    LeaveManage,
    LeaveViewAll,
    UserRolesEdit,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigView => "config_view",
            Self::ConfigEdit => "config_edit",
            Self::LeaveManage => "leave_manage",
            Self::LeaveViewAll => "leave_view_all",
            Self::UserRolesEdit => "user_roles_edit",
        }
    }
}

impl DashboardRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Moderator => "moderator",
            Self::Administrator => "administrator",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Permissions granted by this role.
    pub fn permissions(&self) -> Vec<Permission> {
        let mut permissions = Vec::new();

        if *self >= Self::Moderator {
            permissions.push(Permission::LeaveViewAll);
        }
        if *self >= Self::Administrator {
            permissions.push(Permission::ConfigView);
            permissions.push(Permission::LeaveManage);
        }
        if *self >= Self::SuperAdmin {
            permissions.push(Permission::ConfigEdit);
            permissions.push(Permission::UserRolesEdit);
        }

        permissions
    }

    pub fn has(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    /// Permission names for API responses.
    pub fn permission_names(&self) -> Vec<String> {
        self.permissions()
            .iter()
            .map(|permission| permission.as_str().to_string())
            .collect()
    }
}

impl fmt::Display for DashboardRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DashboardRole {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "user" => Ok(Self::User),
            "moderator" => Ok(Self::Moderator),
            "administrator" | "admin" => Ok(Self::Administrator),
            "super_admin" => Ok(Self::SuperAdmin),
            other => Err(format!("Unknown role '{}'", other)),
        }
    }
}

/// A stored dashboard role assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPermission {
    pub role: DashboardRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(
        default,
        with = "snowflake::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_by: Option<u64>,
    pub assigned_at: DateTime<Utc>,
}

impl UserPermission {
    pub fn into_dto(self, user_id: u64) -> UserRoleDto {
        UserRoleDto {
            user_id: user_id.to_string(),
            username: self.username,
            permissions: self.role.permission_names(),
            role: self.role.as_str().to_string(),
            assigned_at: self.assigned_at,
        }
    }
}

/// Contents of the user-role collection, keyed by Discord user ID.
pub type UserPermissionMap = BTreeMap<u64, UserPermission>;
