use tower_sessions::Session;

use crate::{
    model::user::UserDto,
    server::{
        error::{auth::AuthError, AppError},
        middleware::session::AuthSession,
        model::{
            actor::Actor,
            user_permission::{DashboardRole, Permission},
        },
        service::user_permission::PermissionService,
    },
};

/// A logged-in dashboard user together with the role resolved for this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardUser {
    pub user_id: u64,
    pub name: String,
    pub role: DashboardRole,
}

impl DashboardUser {
    /// The identity used when this user acts on leave records.
    pub fn actor(&self) -> Actor {
        Actor::dashboard(self.user_id, self.name.clone(), self.role)
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            discord_id: self.user_id.to_string(),
            permissions: self.role.permission_names(),
            role: self.role.as_str().to_string(),
            name: self.name,
        }
    }
}

pub struct AuthGuard<'a> {
    permissions: &'a PermissionService,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(permissions: &'a PermissionService, session: &'a Session) -> Self {
        Self {
            permissions,
            session,
        }
    }

    /// Resolves the session user and checks every listed permission.
    ///
    /// The role is looked up on each request so changes made in the user-role map apply
    /// without logging in again.
    ///
    /// # Returns
    /// - `Ok(DashboardUser)` - Logged in and holding all permissions
    /// - `Err(AuthError::UserNotInSession)` - Not logged in
    /// - `Err(AuthError::AccessDenied)` - A permission is missing
    pub async fn require(&self, permissions: &[Permission]) -> Result<DashboardUser, AppError> {
        let auth_session = AuthSession::new(self.session);

        let Some(user_id) = auth_session.get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };
        let name = auth_session
            .get_user_name()
            .await?
            .unwrap_or_else(|| user_id.to_string());

        let role = self.permissions.role_of(user_id).await?;

        for permission in permissions {
            if !role.has(*permission) {
                return Err(AuthError::AccessDenied(
                    user_id,
                    format!(
                        "role {} lacks the {} permission",
                        role,
                        permission.as_str()
                    ),
                )
                .into());
            }
        }

        Ok(DashboardUser {
            user_id,
            name,
            role,
        })
    }
}
