use axum::{extract::State, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::config::RoleConfigDto,
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{role_config::RoleConfig, user_permission::Permission},
        state::AppState,
    },
};

/// Returns the role configuration with IDs as strings.
///
/// # Returns
/// - `200 OK` - `RoleConfigDto`
/// - `401 Unauthorized` - Not logged in
/// - `403 Forbidden` - Missing `ConfigView`
pub async fn get_config(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.permissions, &session)
        .require(&[Permission::ConfigView])
        .await?;

    let config = state.role_config.get().await?;

    Ok(Json(config.into_dto()))
}

/// Replaces the role configuration.
///
/// The bot process picks the change up once its cached copy expires.
///
/// # Returns
/// - `200 OK` - The stored `RoleConfigDto`
/// - `400 Bad Request` - An ID is malformed
/// - `401 Unauthorized` - Not logged in
/// - `403 Forbidden` - Missing `ConfigEdit`
pub async fn update_config(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RoleConfigDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.permissions, &session)
        .require(&[Permission::ConfigEdit])
        .await?;

    let config = RoleConfig::from_dto(payload)?;
    let config = state.role_config.set(config).await?;

    tracing::info!("Role configuration updated by {}", user.user_id);

    Ok(Json(config.into_dto()))
}
