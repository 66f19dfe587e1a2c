//! Repository for the leave-record-to-announcement map.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::server::{
    data::store::{Collection, JsonStore},
    error::store::StoreError,
    model::message_link::{MessageLink, MessageLinkMap},
};

pub struct MessageLinkRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> MessageLinkRepository<'a> {
    pub fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// Stores or replaces the announcement of a record.
    pub async fn upsert(&self, leave_id: &str, link: MessageLink) -> Result<(), StoreError> {
        self.store
            .update(Collection::MessageLinks, |links: &mut MessageLinkMap| {
                links.insert(leave_id.to_string(), link);
                Ok::<_, StoreError>(())
            })
            .await
    }

    pub async fn find(&self, leave_id: &str) -> Result<Option<MessageLink>, StoreError> {
        let mut links: MessageLinkMap = self.store.load(Collection::MessageLinks).await?;
        Ok(links.remove(leave_id))
    }

    /// Removes the link of a record, returning it if one existed.
    pub async fn remove(&self, leave_id: &str) -> Result<Option<MessageLink>, StoreError> {
        let links: MessageLinkMap = self.store.load(Collection::MessageLinks).await?;
        if !links.contains_key(leave_id) {
            return Ok(None);
        }

        self.store
            .update(Collection::MessageLinks, |links: &mut MessageLinkMap| {
                Ok::<_, StoreError>(links.remove(leave_id))
            })
            .await
    }

    /// Drops links created before `cutoff` whose record is no longer active.
    ///
    /// # Arguments
    /// - `cutoff` - Links created before this instant are eligible
    /// - `active_ids` - IDs of records still in the active collection
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of links dropped
    /// - `Err(StoreError)` - The map could not be read or written
    pub async fn prune(
        &self,
        cutoff: DateTime<Utc>,
        active_ids: &HashSet<String>,
    ) -> Result<usize, StoreError> {
        let stale = |id: &String, link: &MessageLink| {
            link.created_at < cutoff && !active_ids.contains(id)
        };

        let links: MessageLinkMap = self.store.load(Collection::MessageLinks).await?;
        if !links.iter().any(|(id, link)| stale(id, link)) {
            return Ok(0);
        }

        self.store
            .update(Collection::MessageLinks, |links: &mut MessageLinkMap| {
                let before = links.len();
                links.retain(|id, link| !stale(id, &*link));
                Ok::<_, StoreError>(before - links.len())
            })
            .await
    }
}
