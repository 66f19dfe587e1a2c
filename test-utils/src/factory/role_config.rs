//! Role configuration factory.

use serde_json::{json, Map, Value};

use crate::{collection, context::TestContext, error::TestError, fixture};

/// Factory for writing the role configuration singleton.
///
/// Starts from `fixture::role_config::value()`; each setter overrides one entry.
pub struct RoleConfigFactory<'a> {
    ctx: &'a TestContext,
    value: Map<String, Value>,
}

impl<'a> RoleConfigFactory<'a> {
    pub fn new(ctx: &'a TestContext) -> Self {
        let value = match fixture::role_config::value() {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        Self { ctx, value }
    }

    /// Starts from an empty configuration instead of the fixture.
    pub fn empty(mut self) -> Self {
        self.value.clear();
        self
    }

    fn set_id(mut self, key: &str, id: Option<u64>) -> Self {
        match id {
            Some(id) => {
                self.value.insert(key.to_string(), json!(id.to_string()));
            }
            None => {
                self.value.remove(key);
            }
        }
        self
    }

    fn set_ids(mut self, key: &str, ids: &[u64]) -> Self {
        let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        self.value.insert(key.to_string(), json!(ids));
        self
    }

    pub fn staff_role(self, id: Option<u64>) -> Self {
        self.set_id("staffRoleId", id)
    }

    pub fn leave_role(self, id: Option<u64>) -> Self {
        self.set_id("leaveRoleId", id)
    }

    pub fn leave_channel(self, id: Option<u64>) -> Self {
        self.set_id("leaveChannelId", id)
    }

    pub fn staff_channel(self, id: Option<u64>) -> Self {
        self.set_id("staffChannelId", id)
    }

    pub fn approver_roles(self, ids: &[u64]) -> Self {
        self.set_ids("approverRoleIds", ids)
    }

    pub fn ping_roles(self, ids: &[u64]) -> Self {
        self.set_ids("pingRoleIds", ids)
    }

    pub fn admin_users(self, ids: &[u64]) -> Self {
        self.set_ids("adminUserIds", ids)
    }

    /// Writes the configuration, replacing any existing file.
    pub fn build(self) -> Result<Value, TestError> {
        let value = Value::Object(self.value);
        self.ctx.write_collection(collection::ROLE_CONFIG, &value)?;
        Ok(value)
    }
}
