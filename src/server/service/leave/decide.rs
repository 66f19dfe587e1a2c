use chrono::{DateTime, Utc};

use crate::server::{
    data::leave::LeaveRecordRepository,
    error::{leave::LeaveError, AppError},
    model::{
        actor::Actor,
        event::LeaveEvent,
        leave::{Decision, DecisionOutcome, LeaveRecord, LeaveStatus},
    },
    service::{
        leave::{releasable_role, LeaveService},
        policy::{authorize, LeaveAction},
    },
};

impl<'a> LeaveService<'a> {
    /// Approves or denies a request.
    ///
    /// The stored status is replaced as a whole, so a later decision always overrides an
    /// earlier one and a record is never approved and denied at once. Approval records the
    /// configured leave role as granted; denying a previously approved record, or
    /// re-approving it under a different leave role, hands the old role over for
    /// revocation unless another active record of the user still holds it.
    ///
    /// # Arguments
    /// - `actor` - The approver
    /// - `leave_id` - Record to decide on
    /// - `outcome` - Approve or deny
    /// - `now` - Decision time
    ///
    /// # Returns
    /// - `Ok(LeaveRecord)` - The record with its new status
    /// - `Err(AppError::LeaveErr(Unauthorized))` - The actor is not an approver
    /// - `Err(AppError::LeaveErr(NotFound))` - No active record with this ID
    pub async fn decide(
        &self,
        actor: &Actor,
        leave_id: &str,
        outcome: DecisionOutcome,
        now: DateTime<Utc>,
    ) -> Result<LeaveRecord, AppError> {
        authorize(actor, LeaveAction::Decide, &self.config)?;

        let leave_role_id = self.config.leave_role_id;
        let today = now.date_naive();

        let (record, revoke_role_id) = LeaveRecordRepository::new(self.store)
            .modify(|records| {
                let record = records
                    .iter_mut()
                    .find(|r| r.id == leave_id)
                    .ok_or_else(|| AppError::from(LeaveError::NotFound(leave_id.to_string())))?;

                let decision = Decision {
                    by: actor.user_id,
                    by_name: actor.display_name.clone(),
                    at: now,
                };

                let previous_role_id = match outcome {
                    DecisionOutcome::Approve => {
                        record.status = LeaveStatus::Approved(decision);
                        std::mem::replace(&mut record.granted_role_id, leave_role_id)
                            .filter(|previous| Some(*previous) != leave_role_id)
                    }
                    DecisionOutcome::Deny => {
                        record.status = LeaveStatus::Denied(decision);
                        record.granted_role_id.take()
                    }
                };

                let record = record.clone();
                let revoke_role_id =
                    releasable_role(records, record.user_id, previous_role_id, today);

                Ok::<_, AppError>((record, revoke_role_id))
            })
            .await?;

        tracing::info!(
            "Leave {} of user {} {} by {}",
            record.id,
            record.user_id,
            record.status.as_str(),
            actor.user_id
        );

        self.publish(LeaveEvent::Decided {
            record: record.clone(),
            revoke_role_id,
        })
        .await;

        Ok(record)
    }
}
