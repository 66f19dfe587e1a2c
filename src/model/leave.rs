use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRecordDto {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    #[serde(rename = "type")]
    pub category: String,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    /// `pending`, `approved` or `denied`.
    pub status: String,
    pub approved: bool,
    pub denied: bool,
    /// `scheduled`, `active` or `expired`, computed against the current UTC date.
    pub temporal_state: String,
    pub decided_by: Option<String>,
    pub decided_by_name: Option<String>,
    pub decided_at: Option<DateTime<Utc>>,
    pub granted_role_id: Option<String>,
    pub change_requests: Vec<ChangeRequestDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequestDto {
    pub by_name: String,
    pub comment: String,
    pub at: DateTime<Utc>,
}

/// Body of `POST /api/leave-records`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveRecordDto {
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
    #[serde(rename = "type")]
    pub category: String,
    #[serde(default)]
    pub is_private: bool,
}

/// Payload of `loa_status_update` envelopes and `record-status-changed` live events.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordStatusChangedDto {
    pub leave_id: String,
    pub user_id: String,
    /// Transition that happened: `created`, `decided`, `changes_requested`, `extended`,
    /// `returned`, `expired` or `deleted`.
    pub action: String,
    /// Status after the transition: `pending`, `approved`, `denied` or `removed`.
    pub status: String,
    pub at: DateTime<Utc>,
}
