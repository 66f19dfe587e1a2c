//! Repository for removed leave records.

use chrono::{DateTime, Utc};

use crate::server::{
    data::store::{Collection, JsonStore},
    error::store::StoreError,
    model::leave::{LeaveRecord, LeaveStatus},
};

/// Archive of records that were swept, returned from early or deleted.
pub struct LeaveHistoryRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> LeaveHistoryRepository<'a> {
    pub fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// Appends removed records to the archive.
    ///
    /// # Arguments
    /// - `records` - Records already carrying a `Removed` status
    pub async fn archive(&self, records: Vec<LeaveRecord>) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }

        self.store
            .update(Collection::LeaveHistory, |history: &mut Vec<LeaveRecord>| {
                history.extend(records);
                Ok::<_, StoreError>(())
            })
            .await
    }

    pub async fn all(&self) -> Result<Vec<LeaveRecord>, StoreError> {
        self.store.load(Collection::LeaveHistory).await
    }

    /// Drops archived records removed before `cutoff`.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of records dropped
    /// - `Err(StoreError)` - The archive could not be read or written
    pub async fn prune_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        let history: Vec<LeaveRecord> = self.all().await?;
        if !history.iter().any(|record| removed_at(record) < cutoff) {
            return Ok(0);
        }

        self.store
            .update(Collection::LeaveHistory, |history: &mut Vec<LeaveRecord>| {
                let before = history.len();
                history.retain(|record| removed_at(record) >= cutoff);
                Ok::<_, StoreError>(before - history.len())
            })
            .await
    }
}

fn removed_at(record: &LeaveRecord) -> DateTime<Utc> {
    match &record.status {
        LeaveStatus::Removed { at, .. } => *at,
        _ => record.created_at,
    }
}
