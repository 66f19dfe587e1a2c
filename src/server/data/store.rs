//! File-backed JSON collection store.
//!
//! Every collection lives in a single pretty-printed JSON file inside the data directory.
//! Reads load the whole file, writes replace the whole file through a temporary file and a
//! rename so a crash mid-write never leaves a truncated collection behind.
//!
//! Read-modify-write cycles go through [`JsonStore::update`], which holds a per-collection
//! async mutex for the duration of the cycle. This serializes writers inside one process;
//! writers in different processes sharing the directory still race with last writer wins.

use serde::{de::DeserializeOwned, Serialize};
use std::{
    collections::HashMap,
    fmt,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::sync::Mutex;

use crate::server::error::store::StoreError;

/// The collections persisted by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Array of pending, approved and denied leave records.
    ActiveLeaves,
    /// Array of removed leave records.
    LeaveHistory,
    /// Object mapping leave record IDs to announcement messages.
    MessageLinks,
    /// The role configuration object.
    RoleConfig,
    /// Object mapping user IDs to dashboard roles.
    UserPermissions,
    /// Array of notification queue envelopes.
    Notifications,
    /// Array of expiry sweep ledger entries.
    SweepLedger,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::ActiveLeaves,
        Collection::LeaveHistory,
        Collection::MessageLinks,
        Collection::RoleConfig,
        Collection::UserPermissions,
        Collection::Notifications,
        Collection::SweepLedger,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::ActiveLeaves => "active-loas.json",
            Self::LeaveHistory => "loa-history.json",
            Self::MessageLinks => "loa-message-map.json",
            Self::RoleConfig => "staff-config.json",
            Self::UserPermissions => "user-roles.json",
            Self::Notifications => "ipc-messages.json",
            Self::SweepLedger => "notified-loas.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

struct StoreInner {
    dir: PathBuf,
    locks: HashMap<Collection, Mutex<()>>,
}

/// Handle to the data directory. Cheap to clone; clones share the write locks.
#[derive(Clone)]
pub struct JsonStore {
    inner: Arc<StoreInner>,
}

impl JsonStore {
    /// Opens the store, creating the data directory when it does not exist yet.
    ///
    /// # Arguments
    /// - `dir` - Directory holding the collection files
    ///
    /// # Returns
    /// - `Ok(JsonStore)` - Store ready for use
    /// - `Err(StoreError::Io)` - The directory could not be created
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| StoreError::Io {
                collection: "data directory",
                source,
            })?;

        let locks = Collection::ALL
            .into_iter()
            .map(|collection| (collection, Mutex::new(())))
            .collect();

        Ok(Self {
            inner: Arc::new(StoreInner { dir, locks }),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.inner.dir
    }

    fn path(&self, collection: Collection) -> PathBuf {
        self.inner.dir.join(collection.file_name())
    }

    fn lock(&self, collection: Collection) -> &Mutex<()> {
        // Every collection gets a lock in `open`.
        &self.inner.locks[&collection]
    }

    /// Whether the collection file exists on disk.
    pub async fn exists(&self, collection: Collection) -> bool {
        tokio::fs::try_exists(self.path(collection))
            .await
            .unwrap_or(false)
    }

    /// Loads a whole collection.
    ///
    /// A missing or blank file yields the collection's default (empty) value.
    ///
    /// # Returns
    /// - `Ok(T)` - The parsed collection
    /// - `Err(StoreError::Io)` - The file exists but could not be read
    /// - `Err(StoreError::Serde)` - The file does not hold the expected shape
    pub async fn load<T>(&self, collection: Collection) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        let contents = match tokio::fs::read_to_string(self.path(collection)).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
            Err(source) => {
                return Err(StoreError::Io {
                    collection: collection.file_name(),
                    source,
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(T::default());
        }

        serde_json::from_str(&contents).map_err(|source| StoreError::Serde {
            collection: collection.file_name(),
            source,
        })
    }

    /// Replaces a whole collection.
    pub async fn save<T: Serialize>(
        &self,
        collection: Collection,
        value: &T,
    ) -> Result<(), StoreError> {
        let _guard = self.lock(collection).lock().await;
        self.write_unlocked(collection, value).await
    }

    /// Loads, mutates and rewrites a collection while holding its write lock.
    ///
    /// When the closure returns an error nothing is written and the error is returned
    /// unchanged.
    ///
    /// # Arguments
    /// - `collection` - Collection to rewrite
    /// - `f` - Mutation applied to the loaded collection
    ///
    /// # Returns
    /// - `Ok(R)` - The closure's result after the collection was written
    /// - `Err(E)` - The closure failed or the store could not read or write the file
    pub async fn update<T, R, E, F>(&self, collection: Collection, f: F) -> Result<R, E>
    where
        T: Serialize + DeserializeOwned + Default,
        E: From<StoreError>,
        F: FnOnce(&mut T) -> Result<R, E>,
    {
        let _guard = self.lock(collection).lock().await;

        let mut value: T = self.load(collection).await?;
        let result = f(&mut value)?;
        self.write_unlocked(collection, &value).await?;

        Ok(result)
    }

    async fn write_unlocked<T: Serialize>(
        &self,
        collection: Collection,
        value: &T,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Serde {
            collection: collection.file_name(),
            source,
        })?;

        let target = self.path(collection);
        let temp = self.inner.dir.join(format!(
            "{}.{}.tmp",
            collection.file_name(),
            std::process::id()
        ));

        let io_err = |source| StoreError::Io {
            collection: collection.file_name(),
            source,
        };

        tokio::fs::write(&temp, json).await.map_err(io_err)?;
        tokio::fs::rename(&temp, &target).await.map_err(io_err)?;

        Ok(())
    }
}
