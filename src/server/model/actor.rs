use crate::server::model::user_permission::DashboardRole;

/// The identity behind an inbound action, resolved by the bot or the dashboard.
///
/// Chat interactions carry the role IDs the member currently holds; dashboard requests
/// carry the dashboard role looked up for the session user instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Discord ID of the acting user.
    pub user_id: u64,
    /// Name shown in announcements and notifications.
    pub display_name: String,
    /// Guild roles held at the time of the action (empty for dashboard requests).
    pub role_ids: Vec<u64>,
    /// Dashboard role, present only for dashboard requests.
    pub dashboard_role: Option<DashboardRole>,
}

impl Actor {
    /// Actor for a chat interaction.
    pub fn chat(user_id: u64, display_name: impl Into<String>, role_ids: Vec<u64>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            role_ids,
            dashboard_role: None,
        }
    }

    /// Actor for an authenticated dashboard request.
    pub fn dashboard(user_id: u64, display_name: impl Into<String>, role: DashboardRole) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            role_ids: Vec::new(),
            dashboard_role: Some(role),
        }
    }

    pub fn has_role(&self, role_id: u64) -> bool {
        self.role_ids.contains(&role_id)
    }

    pub fn has_any_role(&self, role_ids: &[u64]) -> bool {
        role_ids.iter().any(|role_id| self.has_role(*role_id))
    }
}
