//! Authorization policy for leave workflow actions.
//!
//! Both the bot and the dashboard resolve the acting user into an [`Actor`] and ask
//! [`authorize`] before touching any record. Nothing else in the crate checks roles.

use crate::server::{
    error::leave::LeaveError,
    model::{actor::Actor, role_config::RoleConfig, user_permission::DashboardRole},
};

/// Actions on leave records that require authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveAction {
    Submit,
    Extend,
    EarlyReturn,
    Decide,
    RequestChanges,
    Delete,
    /// See every requester's records rather than only one's own.
    ViewAll,
}

/// Whether the actor may decide on other people's requests.
///
/// Chat actors qualify by holding a configured approver role, dashboard actors by being
/// an administrator or above.
pub fn is_approver(actor: &Actor, config: &RoleConfig) -> bool {
    actor.has_any_role(&config.approver_role_ids)
        || actor
            .dashboard_role
            .is_some_and(|role| role >= DashboardRole::Administrator)
}

/// Whether the actor counts as staff for filing and managing their own leave.
fn is_staff(actor: &Actor, config: &RoleConfig) -> bool {
    if actor.dashboard_role.is_some() || is_approver(actor, config) {
        return true;
    }

    match config.staff_role_id {
        Some(role_id) => actor.has_role(role_id),
        None => true,
    }
}

/// Decides whether `actor` may perform `action`.
///
/// # Arguments
/// - `actor` - The resolved identity behind the request
/// - `action` - The action being attempted
/// - `config` - Current role configuration
///
/// # Returns
/// - `Ok(())` - The action is allowed
/// - `Err(LeaveError::Unauthorized)` - The actor lacks the required role
pub fn authorize(actor: &Actor, action: LeaveAction, config: &RoleConfig) -> Result<(), LeaveError> {
    let allowed = match action {
        LeaveAction::Submit | LeaveAction::Extend | LeaveAction::EarlyReturn => {
            is_staff(actor, config)
        }
        LeaveAction::Decide | LeaveAction::RequestChanges | LeaveAction::Delete => {
            is_approver(actor, config)
        }
        LeaveAction::ViewAll => {
            is_approver(actor, config)
                || actor
                    .dashboard_role
                    .is_some_and(|role| role >= DashboardRole::Moderator)
        }
    };

    if allowed {
        Ok(())
    } else {
        Err(LeaveError::Unauthorized)
    }
}
