use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::server::{
    error::AppError,
    middleware::{
        auth::AuthGuard,
        session::{AuthSession, CsrfSession},
    },
    service::oauth::DiscordAuthService,
    state::AppState,
};

/// Query parameters for the OAuth callback endpoint.
#[derive(Deserialize)]
pub struct CallbackParams {
    /// CSRF state token to be validated against the session value.
    pub state: String,
    /// Authorization code to exchange for an access token.
    pub code: String,
}

/// Redirects to Discord's authorization page.
///
/// A fresh CSRF token is stored in the session and sent along as the OAuth state.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = DiscordAuthService::new(&state.http_client, &state.oauth_client);

    let (url, csrf_token) = auth_service.login_url();

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().clone())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// Completes the OAuth flow and logs the user in.
///
/// # Returns
/// - `307 Temporary Redirect` - Logged in, back to the dashboard
/// - `400 Bad Request` - CSRF mismatch or the code could not be exchanged
/// - `500 Internal Server Error` - Discord user lookup or session failure
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    CsrfSession::new(&session).validate(&params.state).await?;

    let auth_service = DiscordAuthService::new(&state.http_client, &state.oauth_client);
    let user = auth_service.callback(params.code).await?;

    let user_id = user.id.get();
    let name = user.display_name().to_string();

    AuthSession::new(&session).set_user(user_id, &name).await?;

    if let Err(e) = state.permissions.remember_username(user_id, &name).await {
        tracing::warn!("Failed to store username of {}: {}", user_id, e);
    }

    tracing::info!("User {} ({}) logged in to the dashboard", name, user_id);

    Ok(Redirect::temporary(&state.app_url))
}

pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await;

    Ok(Redirect::temporary(&state.app_url))
}

/// Returns the logged-in user with their dashboard role and permissions.
///
/// # Returns
/// - `200 OK` - `UserDto`
/// - `401 Unauthorized` - Not logged in
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.permissions, &session)
        .require(&[])
        .await?;

    Ok(Json(user.into_dto()))
}
