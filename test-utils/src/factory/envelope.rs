//! Notification queue envelope factory.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::{collection, context::TestContext, error::TestError, factory::helpers::next_id};

/// Factory for appending envelopes to the notification queue log.
///
/// # Example
///
/// ```rust,ignore
/// EnvelopeFactory::new(&test)
///     .kind("loa_status_update")
///     .processed_at(Utc::now() - Duration::hours(30))
///     .build()?;
/// ```
pub struct EnvelopeFactory<'a> {
    ctx: &'a TestContext,
    id: String,
    kind: String,
    payload: Value,
    created_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
}

impl<'a> EnvelopeFactory<'a> {
    /// Creates a new unprocessed envelope of type `"test"` with an empty payload.
    pub fn new(ctx: &'a TestContext) -> Self {
        Self {
            ctx,
            id: format!("test-{}", next_id()),
            kind: "test".to_string(),
            payload: json!({}),
            created_at: Utc::now(),
            processed_at: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Marks the envelope processed at the given time.
    pub fn processed_at(mut self, processed_at: DateTime<Utc>) -> Self {
        self.processed_at = Some(processed_at);
        self
    }

    /// Appends the envelope to the queue log.
    ///
    /// # Returns
    /// - `Ok(Value)` - The envelope as written
    /// - `Err(TestError)` - Failed to read or write the queue file
    pub fn build(self) -> Result<Value, TestError> {
        let mut value = json!({
            "id": self.id,
            "type": self.kind,
            "payload": self.payload,
            "createdAt": self.created_at.to_rfc3339(),
            "processed": self.processed_at.is_some(),
        });

        if let (Some(at), Some(map)) = (self.processed_at, value.as_object_mut()) {
            map.insert("processedAt".to_string(), json!(at.to_rfc3339()));
        }

        self.ctx
            .append_to_collection(collection::NOTIFICATIONS, value.clone())?;

        Ok(value)
    }
}

/// Appends an unprocessed envelope of the given type.
pub fn create_envelope(
    ctx: &TestContext,
    kind: &str,
    payload: Value,
) -> Result<Value, TestError> {
    EnvelopeFactory::new(ctx).kind(kind).payload(payload).build()
}
