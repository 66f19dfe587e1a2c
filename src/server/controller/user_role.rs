use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tower_sessions::Session;

use crate::{
    model::user::{UpdateUserRoleDto, UserRoleDto},
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::user_permission::{DashboardRole, Permission},
        state::AppState,
        util::parse::parse_discord_id,
    },
};

/// Lists every stored dashboard role assignment.
///
/// # Returns
/// - `200 OK` - `Vec<UserRoleDto>` ordered by user ID
/// - `403 Forbidden` - Missing `UserRolesEdit`
pub async fn get_user_roles(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.permissions, &session)
        .require(&[Permission::UserRolesEdit])
        .await?;

    let roles: Vec<UserRoleDto> = state
        .permissions
        .list()
        .await?
        .into_iter()
        .map(|(user_id, permission)| permission.into_dto(user_id))
        .collect();

    Ok(Json(roles))
}

/// Assigns a dashboard role to a user.
///
/// # Returns
/// - `200 OK` - The stored `UserRoleDto`
/// - `400 Bad Request` - Malformed user ID, unknown role, or a super admin demoting themselves
/// - `403 Forbidden` - Missing `UserRolesEdit`
pub async fn update_user_role(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<String>,
    Json(payload): Json<UpdateUserRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.permissions, &session)
        .require(&[Permission::UserRolesEdit])
        .await?;

    let target_id = parse_discord_id(&user_id)?;
    let role = payload
        .role
        .parse::<DashboardRole>()
        .map_err(AppError::BadRequest)?;

    if target_id == user.user_id && role < user.role {
        return Err(AppError::BadRequest(
            "You cannot lower your own dashboard role".to_string(),
        ));
    }

    let permission = state
        .permissions
        .assign(target_id, role, user.user_id, Utc::now())
        .await?;

    Ok(Json(permission.into_dto(target_id)))
}
