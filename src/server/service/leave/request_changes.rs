use chrono::{DateTime, Utc};

use crate::server::{
    data::leave::LeaveRecordRepository,
    error::{leave::LeaveError, AppError},
    model::{
        actor::Actor,
        event::LeaveEvent,
        leave::{ChangeRequest, LeaveRecord},
    },
    service::{
        leave::{non_blank, LeaveService},
        policy::{authorize, LeaveAction},
    },
};

impl<'a> LeaveService<'a> {
    /// Asks the requester to change a request without deciding on it.
    ///
    /// The status is left as is; the comment is appended to the record and shown on
    /// the announcement.
    ///
    /// # Returns
    /// - `Ok(LeaveRecord)` - The record including the new change request
    /// - `Err(AppError::LeaveErr(Validation))` - The comment is empty
    /// - `Err(AppError::LeaveErr(Unauthorized))` - The actor is not an approver
    /// - `Err(AppError::LeaveErr(NotFound))` - No active record with this ID
    pub async fn request_changes(
        &self,
        actor: &Actor,
        leave_id: &str,
        comment: &str,
        now: DateTime<Utc>,
    ) -> Result<LeaveRecord, AppError> {
        authorize(actor, LeaveAction::RequestChanges, &self.config)?;

        let comment = non_blank(comment).ok_or_else(|| {
            LeaveError::Validation("Please describe the changes you are requesting.".to_string())
        })?;

        let record = LeaveRecordRepository::new(self.store)
            .modify(|records| {
                let record = records
                    .iter_mut()
                    .find(|r| r.id == leave_id)
                    .ok_or_else(|| AppError::from(LeaveError::NotFound(leave_id.to_string())))?;

                record.change_requests.push(ChangeRequest {
                    by: actor.user_id,
                    by_name: actor.display_name.clone(),
                    comment: comment.clone(),
                    at: now,
                });

                Ok::<_, AppError>(record.clone())
            })
            .await?;

        tracing::info!(
            "Changes requested on leave {} of user {} by {}",
            record.id,
            record.user_id,
            actor.user_id
        );

        self.publish(LeaveEvent::ChangesRequested {
            record: record.clone(),
            comment,
            by_name: actor.display_name.clone(),
        })
        .await;

        Ok(record)
    }
}
