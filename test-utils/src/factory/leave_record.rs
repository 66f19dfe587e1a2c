//! Leave record factory for seeding the active and history collections.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{json, Value};

use crate::{
    collection, context::TestContext, error::TestError, factory::helpers::next_id,
    fixture::{date::days_from_today, discord::REQUESTER_ID},
};

/// Factory for creating leave records with customizable fields.
///
/// Records with a `removed` status are written to the history collection; every other
/// status lands in the active collection.
///
/// # Example
///
/// ```rust,ignore
/// let record = LeaveRecordFactory::new(&test)
///     .requester(REQUESTER_ID, "Requester")
///     .dates(ymd(2025, 1, 5), ymd(2025, 1, 10))
///     .approved_by(APPROVER_ID)
///     .build()?;
/// ```
pub struct LeaveRecordFactory<'a> {
    ctx: &'a TestContext,
    id: String,
    user_id: u64,
    username: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: String,
    category: String,
    is_private: bool,
    created_at: DateTime<Utc>,
    status: Value,
    granted_role_id: Option<u64>,
}

impl<'a> LeaveRecordFactory<'a> {
    /// Creates a new LeaveRecordFactory with default values.
    ///
    /// Defaults:
    /// - id: `"LOA-TEST{n}"` where n is auto-incremented
    /// - requester: `REQUESTER_ID` named `"Staff {n}"`
    /// - dates: tomorrow through five days from now
    /// - category: `vacation`, public, pending
    pub fn new(ctx: &'a TestContext) -> Self {
        let id = next_id();
        Self {
            ctx,
            id: format!("LOA-TEST{}", id),
            user_id: REQUESTER_ID,
            username: format!("Staff {}", id),
            start_date: days_from_today(1),
            end_date: days_from_today(5),
            reason: "Family trip".to_string(),
            category: "vacation".to_string(),
            is_private: false,
            created_at: Utc::now(),
            status: json!({ "state": "pending" }),
            granted_role_id: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the requester identity.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID of the requester
    /// - `username` - Display name recorded on the request
    pub fn requester(mut self, user_id: u64, username: impl Into<String>) -> Self {
        self.user_id = user_id;
        self.username = username.into();
        self
    }

    /// Sets the inclusive date range of the leave.
    pub fn dates(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Sets the category using its wire name (e.g. `"school_work"`).
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn private(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Marks the record approved by the given user.
    pub fn approved_by(mut self, user_id: u64) -> Self {
        self.status = json!({
            "state": "approved",
            "by": user_id.to_string(),
            "byName": format!("Approver {}", user_id),
            "at": Utc::now().to_rfc3339(),
        });
        self
    }

    /// Marks the record denied by the given user.
    pub fn denied_by(mut self, user_id: u64) -> Self {
        self.status = json!({
            "state": "denied",
            "by": user_id.to_string(),
            "byName": format!("Approver {}", user_id),
            "at": Utc::now().to_rfc3339(),
        });
        self
    }

    /// Marks the record removed, which writes it to the history collection.
    ///
    /// # Arguments
    /// - `reason` - Wire name of the removal reason (`expired`, `early_return`, `deleted`)
    /// - `at` - Removal timestamp, used by history pruning
    pub fn removed(mut self, reason: &str, at: DateTime<Utc>) -> Self {
        self.status = json!({
            "state": "removed",
            "reason": reason,
            "at": at.to_rfc3339(),
        });
        self
    }

    /// Records that a leave role was granted for this record.
    pub fn granted_role(mut self, role_id: u64) -> Self {
        self.granted_role_id = Some(role_id);
        self
    }

    /// Builds the record JSON without writing it anywhere.
    pub fn value(&self) -> Value {
        let mut value = json!({
            "id": self.id,
            "userId": self.user_id.to_string(),
            "username": self.username,
            "startDate": self.start_date.format("%Y-%m-%d").to_string(),
            "endDate": self.end_date.format("%Y-%m-%d").to_string(),
            "reason": self.reason,
            "type": self.category,
            "isPrivate": self.is_private,
            "createdAt": self.created_at.to_rfc3339(),
            "status": self.status,
        });

        if let (Some(role_id), Some(map)) = (self.granted_role_id, value.as_object_mut()) {
            map.insert("grantedRoleId".to_string(), json!(role_id.to_string()));
        }

        value
    }

    /// Builds the record and appends it to its collection.
    ///
    /// # Returns
    /// - `Ok(Value)` - The record as written
    /// - `Err(TestError)` - Failed to read or write the collection file
    pub fn build(self) -> Result<Value, TestError> {
        let value = self.value();
        let file = if self.status["state"] == "removed" {
            collection::LEAVE_HISTORY
        } else {
            collection::ACTIVE_LEAVES
        };

        self.ctx.append_to_collection(file, value.clone())?;

        Ok(value)
    }
}

/// Creates a pending leave record with default values.
///
/// Shorthand for `LeaveRecordFactory::new(ctx).build()`.
pub fn create_leave_record(ctx: &TestContext) -> Result<Value, TestError> {
    LeaveRecordFactory::new(ctx).build()
}

/// Creates an approved leave record for a requester over the given dates.
pub fn create_approved_leave(
    ctx: &TestContext,
    user_id: u64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    approver_id: u64,
) -> Result<Value, TestError> {
    LeaveRecordFactory::new(ctx)
        .requester(user_id, format!("Staff {}", user_id))
        .dates(start_date, end_date)
        .approved_by(approver_id)
        .build()
}
