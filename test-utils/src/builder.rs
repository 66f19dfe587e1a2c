use serde_json::Value;

use crate::{collection, context::TestContext, error::TestError, fixture};

/// Builder for creating test contexts with pre-seeded collections.
///
/// Provides a fluent interface for configuring the files present in the temporary data
/// directory before the code under test opens it. Call `build()` to create the context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
///
/// let test = TestBuilder::new()
///     .with_default_role_config()
///     .with_collection(collection::ACTIVE_LEAVES, json!([]))
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// Collection files to write during `build()`, in insertion order.
    collections: Vec<(&'static str, Value)>,
}

impl TestBuilder {
    /// Creates a new test builder with no collections seeded.
    pub fn new() -> Self {
        Self {
            collections: Vec::new(),
        }
    }

    /// Seeds a collection file with the provided raw JSON.
    ///
    /// A later call for the same file replaces the earlier one.
    ///
    /// # Arguments
    /// - `file` - Collection file name (see `collection`)
    /// - `value` - Full collection contents
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_collection(mut self, file: &'static str, value: Value) -> Self {
        self.collections.retain(|(existing, _)| *existing != file);
        self.collections.push((file, value));
        self
    }

    /// Seeds the role configuration with the provided JSON object.
    pub fn with_role_config(self, value: Value) -> Self {
        self.with_collection(collection::ROLE_CONFIG, value)
    }

    /// Seeds the role configuration with the fixture identifiers.
    ///
    /// Configures staff, leave, approver and ping roles plus both announcement channels, so
    /// that every effect has somewhere to go.
    pub fn with_default_role_config(self) -> Self {
        self.with_role_config(fixture::role_config::value())
    }

    /// Builds the test context and writes all seeded collections.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with every seeded collection written to disk
    /// - `Err(TestError)` - Failed to create the directory or write a file
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new()?;

        for (file, value) in &self.collections {
            setup.write_collection(file, value)?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
