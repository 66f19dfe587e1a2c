use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

use crate::server::{
    data::{
        history::LeaveHistoryRepository, leave::LeaveRecordRepository,
        message_link::MessageLinkRepository, sweep_ledger::SweepLedgerRepository,
    },
    error::AppError,
    model::{
        event::LeaveEvent,
        leave::{LeaveRecord, RemovalReason, TemporalState},
    },
    service::leave::{releasable_role, LeaveService},
};

const LEDGER_RETENTION: Duration = Duration::days(30);
const HISTORY_RETENTION: Duration = Duration::days(90);
const MESSAGE_LINK_RETENTION: Duration = Duration::days(90);

/// What one sweep pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Records removed from the active collection.
    pub expired: usize,
    /// Expiries whose effects were applied (first time seen by the ledger).
    pub notified: usize,
    pub ledger_pruned: usize,
    pub history_pruned: usize,
    pub links_pruned: usize,
}

impl<'a> LeaveService<'a> {
    /// Finalizes every record whose end date has passed.
    ///
    /// Expired records of any status leave the active collection and are archived. The
    /// sweep ledger guarantees each `(requester, record)` pair gets its role revoked and
    /// its requester notified at most once, even across restarts or a second sweeping
    /// process. The role stays when another active approved record of the same user
    /// still holds it. Afterwards old ledger entries, history entries and announcement links are
    /// pruned.
    ///
    /// # Arguments
    /// - `now` - Time of the sweep; records ending before today's UTC date expire
    ///
    /// # Returns
    /// - `Ok(SweepSummary)` - Counts of what was expired and pruned
    /// - `Err(AppError::StoreErr)` - The active collection could not be read or written
    pub async fn sweep(&self, now: DateTime<Utc>) -> Result<SweepSummary, AppError> {
        let today = now.date_naive();
        let repo = LeaveRecordRepository::new(self.store);
        let ledger = SweepLedgerRepository::new(self.store);
        let mut summary = SweepSummary::default();

        let is_expired = |record: &LeaveRecord| record.temporal_state(today) == TemporalState::Expired;

        let expired: Vec<(LeaveRecord, Option<u64>)> = if repo.all().await?.iter().any(is_expired) {
            repo.modify(|records| {
                let (expired, kept): (Vec<_>, Vec<_>) =
                    std::mem::take(records).into_iter().partition(is_expired);
                *records = kept;
                let remaining: &[LeaveRecord] = records;

                let expired = expired
                    .into_iter()
                    .map(|record| {
                        let granted = record
                            .status
                            .is_approved()
                            .then_some(record.granted_role_id)
                            .flatten();
                        let revoke_role_id =
                            releasable_role(remaining, record.user_id, granted, today);
                        (record, revoke_role_id)
                    })
                    .collect();

                Ok::<_, AppError>(expired)
            })
            .await?
        } else {
            Vec::new()
        };

        summary.expired = expired.len();

        if !expired.is_empty() {
            let removed = expired
                .iter()
                .map(|(record, _)| record.clone().into_removed(RemovalReason::Expired, now))
                .collect();
            if let Err(e) = LeaveHistoryRepository::new(self.store).archive(removed).await {
                tracing::error!("Failed to archive {} expired leaves: {}", expired.len(), e);
            }
        }

        for (record, revoke_role_id) in expired {
            match ledger.record_if_new(record.user_id, &record.id, now).await {
                Ok(true) => {
                    tracing::info!(
                        "Leave {} of user {} expired on {}",
                        record.id,
                        record.user_id,
                        record.end_date
                    );
                    summary.notified += 1;
                    self.publish(LeaveEvent::Expired {
                        record,
                        revoke_role_id,
                    })
                    .await;
                }
                Ok(false) => {
                    tracing::debug!(
                        "Expiry of {} for user {} already handled",
                        record.id,
                        record.user_id
                    );
                }
                Err(e) => {
                    // Already removed from the active collection; this is the only pass
                    // that will see it.
                    tracing::error!(
                        "Failed to check sweep ledger for {} of user {}: {}",
                        record.id,
                        record.user_id,
                        e
                    );
                    summary.notified += 1;
                    self.publish(LeaveEvent::Expired {
                        record,
                        revoke_role_id,
                    })
                    .await;
                }
            }
        }

        summary.ledger_pruned = ledger
            .prune_older_than(now - LEDGER_RETENTION)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("Failed to prune sweep ledger: {}", e);
                0
            });

        summary.history_pruned = LeaveHistoryRepository::new(self.store)
            .prune_older_than(now - HISTORY_RETENTION)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("Failed to prune leave history: {}", e);
                0
            });

        let active_ids: HashSet<String> = repo.all().await?.into_iter().map(|r| r.id).collect();
        summary.links_pruned = MessageLinkRepository::new(self.store)
            .prune(now - MESSAGE_LINK_RETENTION, &active_ids)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("Failed to prune announcement links: {}", e);
                0
            });

        Ok(summary)
    }
}
