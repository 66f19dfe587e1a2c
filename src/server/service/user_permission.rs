//! Dashboard role lookups and assignments.

use chrono::{DateTime, Utc};
use moka::future::Cache;
use std::time::Duration;

use crate::server::{
    data::{store::JsonStore, user_permission::UserPermissionRepository},
    error::store::StoreError,
    model::user_permission::{DashboardRole, UserPermission, UserPermissionMap},
};

const CACHE_TTL: Duration = Duration::from_secs(60);

/// Resolves dashboard roles, caching lookups per user for a minute.
#[derive(Clone)]
pub struct PermissionService {
    store: JsonStore,
    cache: Cache<u64, DashboardRole>,
}

impl PermissionService {
    pub fn new(store: JsonStore) -> Self {
        Self {
            store,
            cache: Cache::builder().time_to_live(CACHE_TTL).build(),
        }
    }

    /// Returns the dashboard role of a user, `User` when none was assigned.
    pub async fn role_of(&self, user_id: u64) -> Result<DashboardRole, StoreError> {
        if let Some(role) = self.cache.get(&user_id).await {
            return Ok(role);
        }

        let role = UserPermissionRepository::new(&self.store)
            .find(user_id)
            .await?
            .map(|permission| permission.role)
            .unwrap_or_default();
        self.cache.insert(user_id, role).await;

        Ok(role)
    }

    pub async fn list(&self) -> Result<UserPermissionMap, StoreError> {
        UserPermissionRepository::new(&self.store).all().await
    }

    /// Assigns a dashboard role to a user.
    ///
    /// # Arguments
    /// - `user_id` - User receiving the role
    /// - `role` - New role
    /// - `assigned_by` - Dashboard user making the change
    /// - `now` - Assignment time
    ///
    /// # Returns
    /// - `Ok(UserPermission)` - The stored assignment
    /// - `Err(StoreError)` - The collection could not be written
    pub async fn assign(
        &self,
        user_id: u64,
        role: DashboardRole,
        assigned_by: u64,
        now: DateTime<Utc>,
    ) -> Result<UserPermission, StoreError> {
        let repo = UserPermissionRepository::new(&self.store);
        let username = repo.find(user_id).await?.and_then(|p| p.username);

        let permission = UserPermission {
            role,
            username,
            assigned_by: Some(assigned_by),
            assigned_at: now,
        };
        repo.set(user_id, permission.clone()).await?;
        self.cache.invalidate(&user_id).await;

        tracing::info!(
            "User {} assigned dashboard role {} by {}",
            user_id,
            role,
            assigned_by
        );

        Ok(permission)
    }

    /// Records the display name of a user who logged in, keeping any assigned role.
    pub async fn remember_username(&self, user_id: u64, username: &str) -> Result<(), StoreError> {
        let repo = UserPermissionRepository::new(&self.store);
        let Some(mut permission) = repo.find(user_id).await? else {
            return Ok(());
        };

        if permission.username.as_deref() == Some(username) {
            return Ok(());
        }

        permission.username = Some(username.to_string());
        repo.set(user_id, permission).await
    }
}
