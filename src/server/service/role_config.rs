//! Cached access to the role configuration.

use moka::future::Cache;
use std::time::Duration;

use crate::server::{
    data::{role_config::RoleConfigRepository, store::JsonStore},
    error::store::StoreError,
    model::role_config::RoleConfig,
};

const CACHE_TTL: Duration = Duration::from_secs(30);

/// Serves the role configuration from a short-lived cache.
///
/// The configuration file may be rewritten by the other process, so cached values
/// expire after thirty seconds. Writes through this service invalidate immediately.
#[derive(Clone)]
pub struct RoleConfigService {
    store: JsonStore,
    cache: Cache<(), RoleConfig>,
}

impl RoleConfigService {
    pub fn new(store: JsonStore) -> Self {
        Self {
            store,
            cache: Cache::builder().time_to_live(CACHE_TTL).build(),
        }
    }

    /// Returns the current configuration.
    ///
    /// # Returns
    /// - `Ok(RoleConfig)` - Cached or freshly loaded configuration
    /// - `Err(StoreError)` - The configuration file could not be read
    pub async fn get(&self) -> Result<RoleConfig, StoreError> {
        if let Some(config) = self.cache.get(&()).await {
            return Ok(config);
        }

        let config = RoleConfigRepository::new(&self.store).get().await?;
        self.cache.insert((), config.clone()).await;

        Ok(config)
    }

    /// Replaces the stored configuration.
    pub async fn set(&self, config: RoleConfig) -> Result<RoleConfig, StoreError> {
        RoleConfigRepository::new(&self.store).set(&config).await?;
        self.cache.invalidate(&()).await;

        tracing::info!("Role configuration updated");

        Ok(config)
    }

    /// Changes single entries of the stored configuration.
    ///
    /// Reads the file rather than the cache, so entries changed by the other process in
    /// the meantime are kept.
    pub async fn update<F>(&self, f: F) -> Result<RoleConfig, StoreError>
    where
        F: FnOnce(&mut RoleConfig),
    {
        let config = RoleConfigRepository::new(&self.store).update(f).await?;
        self.cache.invalidate(&()).await;

        tracing::info!("Role configuration updated");

        Ok(config)
    }
}
