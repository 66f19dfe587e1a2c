use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tower_sessions::Session;

use crate::{
    model::leave::{CreateLeaveRecordDto, LeaveRecordDto},
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            leave::{DecisionOutcome, LeaveCategory, SubmitLeaveParam},
            user_permission::Permission,
        },
        state::AppState,
    },
};

/// Action segment of `POST /api/leave-records/{id}/{action}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAction {
    Decide(DecisionOutcome),
    Delete,
}

impl RecordAction {
    pub fn parse(action: &str) -> Result<Self, AppError> {
        match action {
            "approve" => Ok(Self::Decide(DecisionOutcome::Approve)),
            "deny" => Ok(Self::Decide(DecisionOutcome::Deny)),
            "delete" => Ok(Self::Delete),
            other => Err(AppError::BadRequest(format!(
                "Unknown action '{}'. Use approve, deny or delete.",
                other
            ))),
        }
    }
}

/// Lists leave records, newest first.
///
/// Users allowed to view all records see everyone's; everybody else sees their own.
///
/// # Returns
/// - `200 OK` - `Vec<LeaveRecordDto>`
/// - `401 Unauthorized` - Not logged in
pub async fn get_leave_records(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.permissions, &session)
        .require(&[])
        .await?;

    let records = state.leave_service().await?.list(&user.actor()).await?;

    let today = Utc::now().date_naive();
    let records: Vec<LeaveRecordDto> = records.iter().map(|r| r.to_dto(today)).collect();

    Ok(Json(records))
}

/// Files a leave request for the logged-in user.
///
/// # Returns
/// - `201 Created` - The stored `LeaveRecordDto`
/// - `400 Bad Request` - Invalid dates, reason or type
/// - `401 Unauthorized` - Not logged in
/// - `409 Conflict` - The user already has a pending or running leave
pub async fn create_leave_record(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateLeaveRecordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.permissions, &session)
        .require(&[])
        .await?;

    let param = SubmitLeaveParam {
        category: payload.category.parse::<LeaveCategory>()?,
        start_date: payload.start_date,
        end_date: payload.end_date,
        reason: payload.reason,
        is_private: payload.is_private,
    };

    let now = Utc::now();
    let record = state
        .leave_service()
        .await?
        .submit(&user.actor(), param, now)
        .await?;

    Ok((StatusCode::CREATED, Json(record.to_dto(now.date_naive()))))
}

/// Approves, denies or deletes a record.
///
/// # Returns
/// - `200 OK` - The decided record, or the deleted record as it was before removal
/// - `400 Bad Request` - Unknown action
/// - `401 Unauthorized` - Not logged in
/// - `403 Forbidden` - Missing the leave management permission
/// - `404 Not Found` - No active record with this ID
pub async fn update_leave_record(
    State(state): State<AppState>,
    session: Session,
    Path((leave_id, action)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.permissions, &session)
        .require(&[Permission::LeaveManage])
        .await?;

    let action = RecordAction::parse(&action)?;

    let service = state.leave_service().await?;
    let actor = user.actor();
    let now = Utc::now();

    let record = match action {
        RecordAction::Decide(outcome) => service.decide(&actor, &leave_id, outcome, now).await?,
        RecordAction::Delete => service.delete(&actor, &leave_id, now).await?,
    };

    Ok(Json(record.to_dto(now.date_naive())))
}
