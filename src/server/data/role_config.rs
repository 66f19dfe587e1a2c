//! Repository for the role configuration singleton.

use crate::server::{
    data::store::{Collection, JsonStore},
    error::store::StoreError,
    model::role_config::RoleConfig,
};

pub struct RoleConfigRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> RoleConfigRepository<'a> {
    pub fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// Reads the stored configuration; an absent file yields an empty configuration.
    pub async fn get(&self) -> Result<RoleConfig, StoreError> {
        self.store.load(Collection::RoleConfig).await
    }

    pub async fn set(&self, config: &RoleConfig) -> Result<(), StoreError> {
        self.store.save(Collection::RoleConfig, config).await
    }

    /// Changes the stored configuration in place under the collection lock.
    pub async fn update<F>(&self, f: F) -> Result<RoleConfig, StoreError>
    where
        F: FnOnce(&mut RoleConfig),
    {
        self.store
            .update(Collection::RoleConfig, |config: &mut RoleConfig| {
                f(config);
                Ok::<_, StoreError>(config.clone())
            })
            .await
    }

    /// Writes `config` only when no configuration file exists yet.
    ///
    /// Once the file exists it is authoritative, so environment values only seed a fresh
    /// data directory.
    ///
    /// # Returns
    /// - `Ok(true)` - The configuration was seeded
    /// - `Ok(false)` - A configuration file already existed
    /// - `Err(StoreError)` - The file could not be written
    pub async fn seed_if_missing(&self, config: &RoleConfig) -> Result<bool, StoreError> {
        if self.store.exists(Collection::RoleConfig).await {
            return Ok(false);
        }

        self.set(config).await?;
        Ok(true)
    }
}
