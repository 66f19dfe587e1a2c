use axum::{extract::State, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::server::{error::AppError, middleware::auth::AuthGuard, state::AppState};

/// Returns leave counts and the latest bot statistics.
///
/// # Returns
/// - `200 OK` - `StatsDto`
/// - `401 Unauthorized` - Not logged in
pub async fn get_stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.permissions, &session)
        .require(&[])
        .await?;

    Ok(Json(state.live.snapshot().await?))
}
