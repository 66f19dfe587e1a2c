//! Repository for dashboard role assignments.

use chrono::{DateTime, Utc};

use crate::server::{
    data::store::{Collection, JsonStore},
    error::store::StoreError,
    model::user_permission::{DashboardRole, UserPermission, UserPermissionMap},
};

/// Provides access to the user-role collection.
///
/// Users absent from the collection hold the default `user` role; the repository only
/// stores explicit assignments.
pub struct UserPermissionRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> UserPermissionRepository<'a> {
    pub fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    pub async fn all(&self) -> Result<UserPermissionMap, StoreError> {
        self.store.load(Collection::UserPermissions).await
    }

    /// Finds the explicit assignment of a user.
    ///
    /// # Returns
    /// - `Ok(Some(UserPermission))` - The user has an assignment
    /// - `Ok(None)` - The user holds the default role
    /// - `Err(StoreError)` - The collection could not be read
    pub async fn find(&self, user_id: u64) -> Result<Option<UserPermission>, StoreError> {
        Ok(self.all().await?.remove(&user_id))
    }

    /// Stores or replaces the assignment of a user.
    pub async fn set(&self, user_id: u64, permission: UserPermission) -> Result<(), StoreError> {
        self.store
            .update(
                Collection::UserPermissions,
                |map: &mut UserPermissionMap| {
                    map.insert(user_id, permission);
                    Ok::<_, StoreError>(())
                },
            )
            .await
    }

    /// Grants the super-admin role to every listed user lacking an assignment.
    ///
    /// Existing assignments are left untouched so a demotion made in the dashboard
    /// survives a restart.
    ///
    /// # Arguments
    /// - `user_ids` - Users configured as super admins
    /// - `now` - Assignment timestamp for new entries
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of assignments created
    /// - `Err(StoreError)` - The collection could not be read or written
    pub async fn seed_super_admins(
        &self,
        user_ids: &[u64],
        now: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        let existing = self.all().await?;
        if user_ids.iter().all(|id| existing.contains_key(id)) {
            return Ok(0);
        }

        self.store
            .update(
                Collection::UserPermissions,
                |map: &mut UserPermissionMap| {
                    let mut seeded = 0;
                    for user_id in user_ids {
                        if map.contains_key(user_id) {
                            continue;
                        }
                        map.insert(
                            *user_id,
                            UserPermission {
                                role: DashboardRole::SuperAdmin,
                                username: None,
                                assigned_by: None,
                                assigned_at: now,
                            },
                        );
                        seeded += 1;
                    }
                    Ok::<_, StoreError>(seeded)
                },
            )
            .await
    }
}
