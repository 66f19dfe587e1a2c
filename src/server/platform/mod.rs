//! Outbound boundary to the chat platform.
//!
//! The leave workflow never talks to Discord directly. It describes what to show as a
//! [`Notice`] and asks a [`ChatPlatform`] to post, edit or delete messages and to grant or
//! revoke roles. Every call returns a `Result` the caller is free to log and drop.

pub mod discord;
#[cfg(test)]
pub mod recording;

use serenity::async_trait;

use crate::server::error::platform::PlatformError;

/// A named value shown on a notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A platform-neutral description of an announcement or a direct message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub colour: u32,
    pub fields: Vec<NoticeField>,
    /// Plain text shown above the embed, used for role mentions.
    pub content: Option<String>,
    pub footer: Option<String>,
    /// When set, the notice carries approve, deny and request-changes buttons for this
    /// leave record. When unset any existing buttons are removed on edit.
    pub decision_id: Option<String>,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>, colour: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            colour,
            ..Default::default()
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(NoticeField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn with_decision_buttons(mut self, leave_id: impl Into<String>) -> Self {
        self.decision_id = Some(leave_id.into());
        self
    }

    /// Looks up the value of a field by name.
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }
}

/// Side effects the leave workflow needs from the chat platform.
///
/// Implementations must never panic. Revoking a role the member does not hold, or from a
/// member who left, is a success.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Posts a notice to a channel and returns the new message ID.
    async fn post_notice(&self, channel_id: u64, notice: &Notice) -> Result<u64, PlatformError>;

    /// Replaces the content of a previously posted notice.
    async fn edit_notice(
        &self,
        channel_id: u64,
        message_id: u64,
        notice: &Notice,
    ) -> Result<(), PlatformError>;

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), PlatformError>;

    async fn grant_role(&self, user_id: u64, role_id: u64, reason: &str)
        -> Result<(), PlatformError>;

    async fn revoke_role(
        &self,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), PlatformError>;

    /// Sends a notice to a user's direct messages.
    async fn direct_message(&self, user_id: u64, notice: &Notice) -> Result<(), PlatformError>;
}
