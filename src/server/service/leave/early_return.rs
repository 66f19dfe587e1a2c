use chrono::{DateTime, Utc};

use crate::server::{
    data::leave::LeaveRecordRepository,
    error::AppError,
    model::{
        actor::Actor,
        event::LeaveEvent,
        leave::{LeaveRecord, LeaveStatus, RemovalReason},
    },
    service::{
        leave::{non_blank, LeaveService},
        policy::{authorize, LeaveAction},
    },
};

/// Result of an early return.
#[derive(Debug, Clone, PartialEq)]
pub enum EarlyReturnOutcome {
    /// The actor was marked back. `record` is absent when only a leftover leave role
    /// was found.
    Returned { record: Option<LeaveRecord> },
    /// The actor had neither a current leave nor the leave role.
    NothingToReturnFrom,
}

impl<'a> LeaveService<'a> {
    /// Ends the actor's current leave before its end date.
    ///
    /// An approved record is preferred over a pending one. The record moves to history,
    /// the leave role is revoked and a "returned" announcement is posted. Calling this
    /// again afterwards finds nothing and changes nothing.
    ///
    /// # Arguments
    /// - `actor` - The returning staff member
    /// - `comment` - Optional message for the announcement
    /// - `now` - Time of return
    ///
    /// # Returns
    /// - `Ok(EarlyReturnOutcome::Returned)` - A record or a leftover role was cleared
    /// - `Ok(EarlyReturnOutcome::NothingToReturnFrom)` - Nothing to do
    /// - `Err(AppError::LeaveErr(Unauthorized))` - The actor is not staff
    pub async fn early_return(
        &self,
        actor: &Actor,
        comment: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<EarlyReturnOutcome, AppError> {
        authorize(actor, LeaveAction::EarlyReturn, &self.config)?;

        let today = now.date_naive();
        let repo = LeaveRecordRepository::new(self.store);

        let has_current = repo
            .find_by_user(actor.user_id)
            .await?
            .iter()
            .any(|r| r.blocks_new_request(today));

        let record = if has_current {
            repo.modify(|records| {
                let position = records
                    .iter()
                    .position(|r| {
                        r.user_id == actor.user_id
                            && r.status.is_approved()
                            && r.blocks_new_request(today)
                    })
                    .or_else(|| {
                        records.iter().position(|r| {
                            r.user_id == actor.user_id
                                && matches!(r.status, LeaveStatus::Pending)
                                && r.blocks_new_request(today)
                        })
                    });

                Ok::<_, AppError>(position.map(|index| records.remove(index)))
            })
            .await?
        } else {
            None
        };

        let held_leave_role = self
            .config
            .leave_role_id
            .filter(|role_id| actor.has_role(*role_id));

        let revoke_role_id = record
            .as_ref()
            .and_then(|r| r.granted_role_id)
            .or(held_leave_role);

        if record.is_none() && revoke_role_id.is_none() {
            return Ok(EarlyReturnOutcome::NothingToReturnFrom);
        }

        if let Some(record) = &record {
            self.archive(record, RemovalReason::EarlyReturn, now).await;
        }

        tracing::info!(
            "User {} returned early from {}",
            actor.user_id,
            record.as_ref().map(|r| r.id.as_str()).unwrap_or("a leftover leave role")
        );

        self.publish(LeaveEvent::Returned {
            user_id: actor.user_id,
            username: actor.display_name.clone(),
            record: record.clone(),
            comment: comment.and_then(non_blank),
            revoke_role_id,
        })
        .await;

        Ok(EarlyReturnOutcome::Returned { record })
    }
}
