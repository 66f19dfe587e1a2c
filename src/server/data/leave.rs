//! Repository for the active leave record collection.

use crate::server::{
    data::store::{Collection, JsonStore},
    error::store::StoreError,
    model::leave::LeaveRecord,
};

/// Access to pending, approved and denied leave records.
pub struct LeaveRecordRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> LeaveRecordRepository<'a> {
    /// Creates a new LeaveRecordRepository instance.
    ///
    /// # Arguments
    /// - `store` - Reference to the collection store
    ///
    /// # Returns
    /// - `LeaveRecordRepository` - New repository instance
    pub fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// Loads every active record in stored order.
    pub async fn all(&self) -> Result<Vec<LeaveRecord>, StoreError> {
        self.store.load(Collection::ActiveLeaves).await
    }

    /// Finds an active record by ID.
    ///
    /// # Returns
    /// - `Ok(Some(LeaveRecord))` - The record exists
    /// - `Ok(None)` - No active record has this ID
    /// - `Err(StoreError)` - The collection could not be read
    pub async fn find_by_id(&self, id: &str) -> Result<Option<LeaveRecord>, StoreError> {
        Ok(self.all().await?.into_iter().find(|record| record.id == id))
    }

    /// Loads the active records filed by one user.
    pub async fn find_by_user(&self, user_id: u64) -> Result<Vec<LeaveRecord>, StoreError> {
        Ok(self
            .all()
            .await?
            .into_iter()
            .filter(|record| record.user_id == user_id)
            .collect())
    }

    /// Rewrites the collection through a closure under the collection's write lock.
    ///
    /// All state transitions on records go through here so the check and the write
    /// happen against the same snapshot.
    pub async fn modify<R, E, F>(&self, f: F) -> Result<R, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut Vec<LeaveRecord>) -> Result<R, E>,
    {
        self.store.update(Collection::ActiveLeaves, f).await
    }
}
