use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Rejections of leave workflow operations.
///
/// Every variant is raised before any write happens, so a rejected operation never leaves
/// a partial change behind. The display text is shown verbatim to the requester, both as
/// an ephemeral chat reply and as the dashboard error body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeaveError {
    /// Bad date format, impossible range, unknown category or missing field.
    #[error("{0}")]
    Validation(String),

    /// An extension does not move the end date forward.
    #[error("The new end date must be after the current end date ({current_end}).")]
    InvalidRange { current_end: NaiveDate },

    /// The actor lacks the role required for the action.
    #[error("You do not have permission to perform this action.")]
    Unauthorized,

    /// The actor may act in general but not on this record (e.g. someone else's leave).
    #[error("You can only modify your own leave of absence.")]
    Forbidden,

    /// No active record with the given id.
    #[error("No leave of absence found with ID {0}.")]
    NotFound(String),

    /// The requester already has an undecided or current leave.
    #[error("You already have an active or pending leave of absence ({existing_id}).")]
    DuplicateActiveRequest { existing_id: String },
}

impl IntoResponse for LeaveError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Validation(_) | Self::InvalidRange { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateActiveRequest { .. } => StatusCode::CONFLICT,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
