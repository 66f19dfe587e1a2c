use chrono::{DateTime, Utc};

use crate::server::{
    data::leave::LeaveRecordRepository,
    error::{leave::LeaveError, AppError},
    model::{
        actor::Actor,
        event::LeaveEvent,
        leave::{LeaveRecord, LeaveStatus, SubmitLeaveParam},
    },
    service::{
        leave::{non_blank, LeaveService},
        policy::{authorize, LeaveAction},
    },
    util::{id::leave_id, parse::parse_date},
};

/// Longest accepted reason; announcements show it in a single embed field.
const MAX_REASON_LEN: usize = 1000;

impl<'a> LeaveService<'a> {
    /// Files a new leave request.
    ///
    /// Dates are validated before anything is written. The duplicate check and the write
    /// happen against the same snapshot of the active collection.
    ///
    /// # Arguments
    /// - `actor` - The requester
    /// - `param` - Raw request input
    /// - `now` - Submission time
    ///
    /// # Returns
    /// - `Ok(LeaveRecord)` - The stored pending record
    /// - `Err(AppError::LeaveErr(Validation))` - Malformed dates, end before start or empty reason
    /// - `Err(AppError::LeaveErr(Unauthorized))` - The actor is not staff
    /// - `Err(AppError::LeaveErr(DuplicateActiveRequest))` - The requester already has a
    ///   pending or current leave
    /// - `Err(AppError::StoreErr)` - The active collection could not be written
    pub async fn submit(
        &self,
        actor: &Actor,
        param: SubmitLeaveParam,
        now: DateTime<Utc>,
    ) -> Result<LeaveRecord, AppError> {
        authorize(actor, LeaveAction::Submit, &self.config)?;

        let start_date = parse_date(&param.start_date, "start date")?;
        let end_date = parse_date(&param.end_date, "end date")?;
        if end_date < start_date {
            return Err(LeaveError::Validation(
                "Invalid date range. The end date must be on or after the start date.".to_string(),
            )
            .into());
        }

        let reason = non_blank(&param.reason).ok_or_else(|| {
            LeaveError::Validation("Please provide a reason for your leave.".to_string())
        })?;
        if reason.chars().count() > MAX_REASON_LEN {
            return Err(LeaveError::Validation(format!(
                "The reason must be at most {} characters.",
                MAX_REASON_LEN
            ))
            .into());
        }

        let today = now.date_naive();

        let record = LeaveRecordRepository::new(self.store)
            .modify(|records| {
                if let Some(existing) = records
                    .iter()
                    .find(|r| r.user_id == actor.user_id && r.blocks_new_request(today))
                {
                    return Err(AppError::from(LeaveError::DuplicateActiveRequest {
                        existing_id: existing.id.clone(),
                    }));
                }

                let id = leave_id(now, |candidate| records.iter().any(|r| r.id == candidate));
                let record = LeaveRecord {
                    id,
                    user_id: actor.user_id,
                    username: actor.display_name.clone(),
                    start_date,
                    end_date,
                    reason,
                    category: param.category,
                    is_private: param.is_private,
                    created_at: now,
                    status: LeaveStatus::Pending,
                    granted_role_id: None,
                    change_requests: Vec::new(),
                };
                records.push(record.clone());

                Ok(record)
            })
            .await?;

        tracing::info!(
            "Leave {} submitted by user {} ({} to {})",
            record.id,
            record.user_id,
            record.start_date,
            record.end_date
        );

        self.publish(LeaveEvent::Created {
            record: record.clone(),
        })
        .await;

        Ok(record)
    }
}
