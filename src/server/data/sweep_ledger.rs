//! Repository for the expiry sweep ledger.

use chrono::{DateTime, Utc};

use crate::server::{
    data::store::{Collection, JsonStore},
    error::store::StoreError,
    model::ledger::SweepLedgerEntry,
};

/// Remembers which `(user, record)` expiries were already handled.
pub struct SweepLedgerRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> SweepLedgerRepository<'a> {
    pub fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    pub async fn all(&self) -> Result<Vec<SweepLedgerEntry>, StoreError> {
        self.store.load(Collection::SweepLedger).await
    }

    /// Records an expiry unless it is already in the ledger.
    ///
    /// The check and the insert happen under the same write lock.
    ///
    /// # Returns
    /// - `Ok(true)` - The entry was new and has been recorded
    /// - `Ok(false)` - The expiry was handled before
    /// - `Err(StoreError)` - The ledger could not be read or written
    pub async fn record_if_new(
        &self,
        user_id: u64,
        leave_id: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let entries = self.all().await?;
        if entries.iter().any(|entry| entry.matches(user_id, leave_id)) {
            return Ok(false);
        }

        self.store
            .update(
                Collection::SweepLedger,
                |entries: &mut Vec<SweepLedgerEntry>| {
                    if entries.iter().any(|entry| entry.matches(user_id, leave_id)) {
                        return Ok::<_, StoreError>(false);
                    }
                    entries.push(SweepLedgerEntry {
                        user_id,
                        leave_id: leave_id.to_string(),
                        swept_at: now,
                    });
                    Ok(true)
                },
            )
            .await
    }

    /// Drops entries recorded before `cutoff`.
    pub async fn prune_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        let entries = self.all().await?;
        if !entries.iter().any(|entry| entry.swept_at < cutoff) {
            return Ok(0);
        }

        self.store
            .update(
                Collection::SweepLedger,
                |entries: &mut Vec<SweepLedgerEntry>| {
                    let before = entries.len();
                    entries.retain(|entry| entry.swept_at >= cutoff);
                    Ok::<_, StoreError>(before - entries.len())
                },
            )
            .await
    }
}
