use chrono::{DateTime, Utc};

use crate::server::{
    data::leave::LeaveRecordRepository,
    error::{leave::LeaveError, AppError},
    model::{
        actor::Actor,
        event::LeaveEvent,
        leave::{ExtendLeaveParam, LeaveRecord, LeaveStatus},
    },
    service::{
        leave::LeaveService,
        policy::{authorize, LeaveAction},
    },
    util::parse::parse_date,
};

impl<'a> LeaveService<'a> {
    /// Moves the end date of the actor's own leave further out.
    ///
    /// The sweep derives expiry from the stored end date, so no revocation needs to be
    /// rescheduled.
    ///
    /// # Arguments
    /// - `actor` - The requester of the record
    /// - `param` - Record ID, new end date and reason
    /// - `now` - Time of the extension
    ///
    /// # Returns
    /// - `Ok(LeaveRecord)` - The record with its new end date
    /// - `Err(AppError::LeaveErr(Validation))` - Malformed date, or the record was denied
    /// - `Err(AppError::LeaveErr(Unauthorized))` - The actor is not staff
    /// - `Err(AppError::LeaveErr(NotFound))` - No active record with this ID
    /// - `Err(AppError::LeaveErr(Forbidden))` - The record belongs to someone else
    /// - `Err(AppError::LeaveErr(InvalidRange))` - The new end date is not after the current one
    pub async fn extend(
        &self,
        actor: &Actor,
        param: ExtendLeaveParam,
        now: DateTime<Utc>,
    ) -> Result<LeaveRecord, AppError> {
        authorize(actor, LeaveAction::Extend, &self.config)?;

        let new_end = parse_date(&param.new_end_date, "new end date")?;
        let leave_id = param.leave_id.trim();

        let (record, previous_end) = LeaveRecordRepository::new(self.store)
            .modify(|records| {
                let record = records
                    .iter_mut()
                    .find(|r| r.id == leave_id)
                    .ok_or_else(|| AppError::from(LeaveError::NotFound(leave_id.to_string())))?;

                if record.user_id != actor.user_id {
                    return Err(LeaveError::Forbidden.into());
                }
                if matches!(record.status, LeaveStatus::Denied(_)) {
                    return Err(LeaveError::Validation(
                        "A denied leave of absence cannot be extended.".to_string(),
                    )
                    .into());
                }
                if new_end <= record.end_date {
                    return Err(LeaveError::InvalidRange {
                        current_end: record.end_date,
                    }
                    .into());
                }

                let previous_end = record.end_date;
                record.end_date = new_end;

                Ok::<_, AppError>((record.clone(), previous_end))
            })
            .await?;

        tracing::info!(
            "Leave {} of user {} extended from {} to {} at {}",
            record.id,
            record.user_id,
            previous_end,
            record.end_date,
            now
        );

        self.publish(LeaveEvent::Extended {
            record: record.clone(),
            previous_end,
            reason: param.reason.trim().to_string(),
        })
        .await;

        Ok(record)
    }
}
