use chrono::{DateTime, Utc};

use crate::server::{
    data::leave::LeaveRecordRepository,
    error::{leave::LeaveError, AppError},
    model::{
        actor::Actor,
        event::LeaveEvent,
        leave::{LeaveRecord, RemovalReason},
    },
    service::{
        leave::{releasable_role, LeaveService},
        policy::{authorize, LeaveAction},
    },
};

impl<'a> LeaveService<'a> {
    /// Removes a record from the active collection into history.
    ///
    /// The granted leave role is revoked unless another active record of the same user
    /// still holds it.
    ///
    /// # Returns
    /// - `Ok(LeaveRecord)` - The record as it was before removal
    /// - `Err(AppError::LeaveErr(Unauthorized))` - The actor is not an approver
    /// - `Err(AppError::LeaveErr(NotFound))` - No active record with this ID
    pub async fn delete(
        &self,
        actor: &Actor,
        leave_id: &str,
        now: DateTime<Utc>,
    ) -> Result<LeaveRecord, AppError> {
        authorize(actor, LeaveAction::Delete, &self.config)?;

        let today = now.date_naive();

        let (record, revoke_role_id) = LeaveRecordRepository::new(self.store)
            .modify(|records| {
                let index = records
                    .iter()
                    .position(|r| r.id == leave_id)
                    .ok_or_else(|| AppError::from(LeaveError::NotFound(leave_id.to_string())))?;

                let record = records.remove(index);
                let granted = record
                    .status
                    .is_approved()
                    .then_some(record.granted_role_id)
                    .flatten();
                let revoke_role_id = releasable_role(records, record.user_id, granted, today);

                Ok::<_, AppError>((record, revoke_role_id))
            })
            .await?;

        self.archive(&record, RemovalReason::Deleted, now).await;

        tracing::info!(
            "Leave {} of user {} deleted by {}",
            record.id,
            record.user_id,
            actor.user_id
        );

        self.publish(LeaveEvent::Deleted {
            record: record.clone(),
            by_name: actor.display_name.clone(),
            revoke_role_id,
        })
        .await;

        Ok(record)
    }
}
