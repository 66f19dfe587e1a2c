use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    model::leave::RecordStatusChangedDto,
    server::{model::leave::LeaveRecord, util::snowflake},
};

/// A committed leave transition whose platform effects still have to be applied.
///
/// Events are applied inline by a process holding a chat platform connection, or shipped
/// as `loa_effect` envelopes to the bot process when the acting process has none. Every
/// event carries the record as it was written so effects never re-read the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum LeaveEvent {
    Created {
        record: LeaveRecord,
    },
    Decided {
        record: LeaveRecord,
        /// Role to revoke when an approved record is later denied, or re-approved under
        /// a different leave role.
        #[serde(default, with = "snowflake::option")]
        revoke_role_id: Option<u64>,
    },
    ChangesRequested {
        record: LeaveRecord,
        comment: String,
        by_name: String,
    },
    Extended {
        record: LeaveRecord,
        previous_end: NaiveDate,
        reason: String,
    },
    Returned {
        #[serde(with = "snowflake")]
        user_id: u64,
        username: String,
        /// The record that was ended, absent when only a leftover role was found.
        record: Option<LeaveRecord>,
        comment: Option<String>,
        #[serde(default, with = "snowflake::option")]
        revoke_role_id: Option<u64>,
    },
    Expired {
        record: LeaveRecord,
        /// Granted role to revoke; absent when another record of the user still holds it.
        #[serde(default, with = "snowflake::option")]
        revoke_role_id: Option<u64>,
    },
    Deleted {
        record: LeaveRecord,
        by_name: String,
        #[serde(default, with = "snowflake::option")]
        revoke_role_id: Option<u64>,
    },
}

impl LeaveEvent {
    /// Name of the transition, as used in status updates.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Decided { .. } => "decided",
            Self::ChangesRequested { .. } => "changes_requested",
            Self::Extended { .. } => "extended",
            Self::Returned { .. } => "returned",
            Self::Expired { .. } => "expired",
            Self::Deleted { .. } => "deleted",
        }
    }

    /// The record affected by the event, if any.
    pub fn record(&self) -> Option<&LeaveRecord> {
        match self {
            Self::Created { record }
            | Self::Decided { record, .. }
            | Self::ChangesRequested { record, .. }
            | Self::Extended { record, .. }
            | Self::Expired { record, .. }
            | Self::Deleted { record, .. } => Some(record),
            Self::Returned { record, .. } => record.as_ref(),
        }
    }

    pub fn user_id(&self) -> u64 {
        match self {
            Self::Returned { user_id, .. } => *user_id,
            _ => self.record().map(|record| record.user_id).unwrap_or_default(),
        }
    }

    /// Builds the status update pushed to dashboard clients.
    pub fn status_update(&self, at: DateTime<Utc>) -> RecordStatusChangedDto {
        let status = match self {
            Self::Returned { .. } | Self::Expired { .. } | Self::Deleted { .. } => "removed",
            _ => self
                .record()
                .map(|record| record.status.as_str())
                .unwrap_or("removed"),
        };

        RecordStatusChangedDto {
            leave_id: self
                .record()
                .map(|record| record.id.clone())
                .unwrap_or_default(),
            user_id: self.user_id().to_string(),
            action: self.action().to_string(),
            status: status.to_string(),
            at,
        }
    }
}
