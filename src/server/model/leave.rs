//! Leave of absence records and their status.
//!
//! A record's stored status is a single tagged value, so a record can never be approved
//! and denied at once. Whether an approved leave is upcoming, running or over is not
//! stored; it is derived from the record's dates on every read.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{
    model::leave::{ChangeRequestDto, LeaveRecordDto},
    server::{error::leave::LeaveError, util::snowflake},
};

/// Kind of leave, chosen by the requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveCategory {
    Vacation,
    Personal,
    Medical,
    SchoolWork,
    Other,
}

impl LeaveCategory {
    pub const ALL: [LeaveCategory; 5] = [
        LeaveCategory::Vacation,
        LeaveCategory::Personal,
        LeaveCategory::Medical,
        LeaveCategory::SchoolWork,
        LeaveCategory::Other,
    ];

    /// Wire name, as stored and as used for slash command choices.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vacation => "vacation",
            Self::Personal => "personal",
            Self::Medical => "medical",
            Self::SchoolWork => "school_work",
            Self::Other => "other",
        }
    }

    /// Human readable name for embeds and choice labels.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Vacation => "Vacation",
            Self::Personal => "Personal",
            Self::Medical => "Medical",
            Self::SchoolWork => "School/Work",
            Self::Other => "Other",
        }
    }
}

impl FromStr for LeaveCategory {
    type Err = LeaveError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', '/'], "_");

        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| {
                LeaveError::Validation(format!(
                    "Unknown leave type '{}'. Choose vacation, personal, medical, school_work or other.",
                    value.trim()
                ))
            })
    }
}

/// Why a record left the active collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    Expired,
    EarlyReturn,
    Deleted,
}

/// Who decided a request and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    #[serde(with = "snowflake")]
    pub by: u64,
    pub by_name: String,
    pub at: DateTime<Utc>,
}

/// Stored status of a leave record.
///
/// `Removed` only appears in the history collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LeaveStatus {
    Pending,
    Approved(Decision),
    Denied(Decision),
    Removed {
        reason: RemovalReason,
        at: DateTime<Utc>,
    },
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved(_) => "approved",
            Self::Denied(_) => "denied",
            Self::Removed { .. } => "removed",
        }
    }

    pub fn decision(&self) -> Option<&Decision> {
        match self {
            Self::Approved(decision) | Self::Denied(decision) => Some(decision),
            _ => None,
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved(_))
    }
}

/// Position of today relative to a record's inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalState {
    Scheduled,
    Active,
    Expired,
}

impl TemporalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Active => "active",
            Self::Expired => "expired",
        }
    }
}

/// A change request left on a record by an approver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequest {
    #[serde(with = "snowflake")]
    pub by: u64,
    pub by_name: String,
    pub comment: String,
    pub at: DateTime<Utc>,
}

/// One leave of absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRecord {
    pub id: String,
    #[serde(with = "snowflake")]
    pub user_id: u64,
    pub username: String,
    pub start_date: NaiveDate,
    /// Last day of the leave, inclusive.
    pub end_date: NaiveDate,
    pub reason: String,
    #[serde(rename = "type")]
    pub category: LeaveCategory,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub status: LeaveStatus,
    /// Leave role granted (or to be granted) for this record.
    #[serde(
        default,
        with = "snowflake::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub granted_role_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub change_requests: Vec<ChangeRequest>,
}

impl LeaveRecord {
    /// Derives the temporal state for the given UTC date.
    pub fn temporal_state(&self, today: NaiveDate) -> TemporalState {
        if today < self.start_date {
            TemporalState::Scheduled
        } else if today <= self.end_date {
            TemporalState::Active
        } else {
            TemporalState::Expired
        }
    }

    /// Whether this record prevents its requester from filing another request.
    ///
    /// Pending and approved records block until their end date has passed.
    pub fn blocks_new_request(&self, today: NaiveDate) -> bool {
        matches!(self.status, LeaveStatus::Pending | LeaveStatus::Approved(_))
            && self.temporal_state(today) != TemporalState::Expired
    }

    /// Whether this record keeps `role_id` on its requester as of `today`.
    pub fn holds_role(&self, role_id: u64, today: NaiveDate) -> bool {
        self.status.is_approved()
            && self.granted_role_id == Some(role_id)
            && self.temporal_state(today) != TemporalState::Expired
    }

    /// Number of calendar days covered, counting both ends.
    pub fn duration_days(&self) -> i64 {
        self.end_date
            .signed_duration_since(self.start_date)
            .num_days()
            + 1
    }

    /// Marks the record removed, ready to be appended to the history collection.
    pub fn into_removed(mut self, reason: RemovalReason, at: DateTime<Utc>) -> Self {
        self.status = LeaveStatus::Removed { reason, at };
        self
    }

    /// Converts the record to its API representation as seen on `today`.
    pub fn to_dto(&self, today: NaiveDate) -> LeaveRecordDto {
        let decision = self.status.decision();

        LeaveRecordDto {
            id: self.id.clone(),
            user_id: self.user_id.to_string(),
            username: self.username.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            reason: self.reason.clone(),
            category: self.category.as_str().to_string(),
            is_private: self.is_private,
            created_at: self.created_at,
            status: self.status.as_str().to_string(),
            approved: matches!(self.status, LeaveStatus::Approved(_)),
            denied: matches!(self.status, LeaveStatus::Denied(_)),
            temporal_state: self.temporal_state(today).as_str().to_string(),
            decided_by: decision.map(|d| d.by.to_string()),
            decided_by_name: decision.map(|d| d.by_name.clone()),
            decided_at: decision.map(|d| d.at),
            granted_role_id: self.granted_role_id.map(|id| id.to_string()),
            change_requests: self
                .change_requests
                .iter()
                .map(|request| ChangeRequestDto {
                    by_name: request.by_name.clone(),
                    comment: request.comment.clone(),
                    at: request.at,
                })
                .collect(),
        }
    }
}

/// Parameters for submitting a new leave request.
///
/// Dates are raw user input; validation happens in the leave service.
#[derive(Debug, Clone)]
pub struct SubmitLeaveParam {
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
    pub category: LeaveCategory,
    pub is_private: bool,
}

/// Parameters for extending an existing leave.
#[derive(Debug, Clone)]
pub struct ExtendLeaveParam {
    pub leave_id: String,
    pub new_end_date: String,
    pub reason: String,
}

/// Outcome chosen by an approver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionOutcome {
    Approve,
    Deny,
}
