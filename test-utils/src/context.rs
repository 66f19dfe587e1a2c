use serde_json::Value;
use std::{path::Path, sync::Arc};
use tempfile::TempDir;
use time::Duration;
use tower_sessions::{Expiry, MemoryStore, Session};

use crate::error::TestError;

/// Test context containing a temporary data directory and an optional session.
///
/// The data directory is removed when the context is dropped, so every test gets an
/// isolated set of collection files. The session is created lazily on first access and
/// persists for the lifetime of the test context.
pub struct TestContext {
    /// Temporary directory holding the JSON collection files.
    pub dir: TempDir,

    /// Optional session instance for session handling.
    ///
    /// Initialized lazily when `session()` is first called. Backed by an in-memory store.
    pub session: Option<Session>,
}

impl TestContext {
    /// Creates a new test context with an empty temporary data directory.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with a fresh directory and no session
    /// - `Err(TestError::Io)` - Failed to create the temporary directory
    pub fn new() -> Result<Self, TestError> {
        Ok(Self {
            dir: tempfile::tempdir()?,
            session: None,
        })
    }

    /// Path of the temporary data directory.
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Reads a collection file as raw JSON.
    ///
    /// # Arguments
    /// - `file` - Collection file name (see `collection`)
    ///
    /// # Returns
    /// - `Ok(Value::Null)` - The file does not exist yet
    /// - `Ok(Value)` - Parsed file contents
    /// - `Err(TestError)` - File unreadable or not valid JSON
    pub fn read_collection(&self, file: &str) -> Result<Value, TestError> {
        let path = self.dir.path().join(file);
        if !path.exists() {
            return Ok(Value::Null);
        }

        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Overwrites a collection file with the provided JSON.
    ///
    /// # Arguments
    /// - `file` - Collection file name (see `collection`)
    /// - `value` - Full collection contents
    pub fn write_collection(&self, file: &str, value: &Value) -> Result<(), TestError> {
        let raw = serde_json::to_string_pretty(value)?;
        std::fs::write(self.dir.path().join(file), raw)?;
        Ok(())
    }

    /// Appends an object to an array-shaped collection, creating the file if missing.
    pub fn append_to_collection(&self, file: &str, value: Value) -> Result<(), TestError> {
        let mut current = self.read_collection(file)?;
        if current.is_null() {
            current = Value::Array(Vec::new());
        }

        let Some(items) = current.as_array_mut() else {
            return Err(TestError::UnexpectedShape(file.to_string()));
        };
        items.push(value);

        self.write_collection(file, &current)
    }

    /// Inserts a key into an object-shaped collection, creating the file if missing.
    pub fn insert_into_collection(
        &self,
        file: &str,
        key: impl Into<String>,
        value: Value,
    ) -> Result<(), TestError> {
        let mut current = self.read_collection(file)?;
        if current.is_null() {
            current = Value::Object(serde_json::Map::new());
        }

        let Some(map) = current.as_object_mut() else {
            return Err(TestError::UnexpectedShape(file.to_string()));
        };
        map.insert(key.into(), value);

        self.write_collection(file, &current)
    }

    /// Gets or creates the test session instance.
    ///
    /// Returns a reference to the existing session if one exists, otherwise creates a new
    /// session backed by an in-memory store with the same 7-day inactivity expiry the
    /// dashboard uses.
    ///
    /// # Example
    /// ```rust,ignore
    /// let mut test = TestContext::new()?;
    /// let session = test.session();
    ///
    /// session.insert("auth:user", "123").await?;
    /// ```
    pub fn session(&mut self) -> &Session {
        self.session.get_or_insert_with(|| {
            Session::new(
                None,
                Arc::new(MemoryStore::default()),
                Some(Expiry::OnInactivity(Duration::days(7))),
            )
        })
    }
}
