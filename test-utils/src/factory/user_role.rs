//! Dashboard role assignment factory.

use chrono::Utc;
use serde_json::{json, Value};

use crate::{collection, context::TestContext, error::TestError, factory::helpers::next_id};

/// Factory for inserting entries into the user-role map.
pub struct UserRoleFactory<'a> {
    ctx: &'a TestContext,
    user_id: u64,
    username: String,
    role: String,
}

impl<'a> UserRoleFactory<'a> {
    /// Creates a factory for a fresh user holding the `user` role.
    pub fn new(ctx: &'a TestContext) -> Self {
        let id = next_id();
        Self {
            ctx,
            user_id: 940_000_000_000_000_000 + id,
            username: format!("Dashboard User {}", id),
            role: "user".to_string(),
        }
    }

    pub fn user_id(mut self, user_id: u64) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Sets the role using its wire name (`user`, `moderator`, `administrator`, `super_admin`).
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn build(self) -> Result<Value, TestError> {
        let value = json!({
            "role": self.role,
            "username": self.username,
            "assignedAt": Utc::now().to_rfc3339(),
        });

        self.ctx.insert_into_collection(
            collection::USER_PERMISSIONS,
            self.user_id.to_string(),
            value.clone(),
        )?;

        Ok(value)
    }
}

/// Assigns a dashboard role to a user.
pub fn create_user_role(ctx: &TestContext, user_id: u64, role: &str) -> Result<Value, TestError> {
    UserRoleFactory::new(ctx).user_id(user_id).role(role).build()
}
