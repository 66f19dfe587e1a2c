//! Discord implementation of the chat platform boundary.

use serenity::{
    all::{
        ButtonStyle, ChannelId, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter,
        CreateMessage, EditMessage, GuildId, MessageId, RoleId, Timestamp, UserId,
    },
    async_trait,
    http::{Http, HttpError},
};
use std::{future::Future, sync::Arc, time::Duration};

use crate::server::{
    bot::component::LeaveComponent,
    error::platform::PlatformError,
    platform::{ChatPlatform, Notice},
};

/// Upper bound for a single Discord REST call.
const CALL_TIMEOUT: Duration = Duration::from_secs(8);

/// Chat platform backed by the Discord REST API for one guild.
pub struct DiscordPlatform {
    http: Arc<Http>,
    guild_id: GuildId,
    timeout: Duration,
}

impl DiscordPlatform {
    /// Creates a platform adapter.
    ///
    /// # Arguments
    /// - `http` - Discord HTTP client, shared with the gateway client when the bot runs
    /// - `guild_id` - Guild whose roles are granted and revoked
    pub fn new(http: Arc<Http>, guild_id: u64) -> Self {
        Self {
            http,
            guild_id: GuildId::new(guild_id),
            timeout: CALL_TIMEOUT,
        }
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, PlatformError>
    where
        F: Future<Output = Result<T, serenity::Error>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(PlatformError::from),
            Err(_) => Err(PlatformError::Timeout),
        }
    }
}

/// Builds the embed for a notice.
fn build_embed(notice: &Notice) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(&notice.title)
        .description(&notice.description)
        .colour(notice.colour)
        .timestamp(Timestamp::now());

    for field in &notice.fields {
        embed = embed.field(&field.name, &field.value, field.inline);
    }

    if let Some(footer) = &notice.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }

    embed
}

/// Builds the decision buttons, or no rows when the notice carries none.
fn build_components(notice: &Notice) -> Vec<CreateActionRow> {
    let Some(leave_id) = &notice.decision_id else {
        return Vec::new();
    };

    vec![CreateActionRow::Buttons(vec![
        CreateButton::new(LeaveComponent::Approve(leave_id.clone()).custom_id())
            .label("Approve")
            .style(ButtonStyle::Success),
        CreateButton::new(LeaveComponent::Deny(leave_id.clone()).custom_id())
            .label("Deny")
            .style(ButtonStyle::Danger),
        CreateButton::new(LeaveComponent::Modify(leave_id.clone()).custom_id())
            .label("Request Changes")
            .style(ButtonStyle::Secondary),
    ])]
}

fn build_message(notice: &Notice) -> CreateMessage {
    let mut message = CreateMessage::new()
        .embed(build_embed(notice))
        .components(build_components(notice));

    if let Some(content) = &notice.content {
        message = message.content(content);
    }

    message
}

/// Whether Discord answered 404, meaning the member, role or message is already gone.
fn is_not_found(error: &serenity::Error) -> bool {
    matches!(
        error,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 404
    )
}

#[async_trait]
impl ChatPlatform for DiscordPlatform {
    async fn post_notice(&self, channel_id: u64, notice: &Notice) -> Result<u64, PlatformError> {
        let message = self
            .bounded(ChannelId::new(channel_id).send_message(&self.http, build_message(notice)))
            .await?;

        Ok(message.id.get())
    }

    async fn edit_notice(
        &self,
        channel_id: u64,
        message_id: u64,
        notice: &Notice,
    ) -> Result<(), PlatformError> {
        let mut edit = EditMessage::new()
            .embed(build_embed(notice))
            .components(build_components(notice));

        if let Some(content) = &notice.content {
            edit = edit.content(content);
        }

        self.bounded(self.http.edit_message(
            ChannelId::new(channel_id),
            MessageId::new(message_id),
            &edit,
            vec![],
        ))
        .await?;

        Ok(())
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), PlatformError> {
        let result = tokio::time::timeout(
            self.timeout,
            self.http.delete_message(
                ChannelId::new(channel_id),
                MessageId::new(message_id),
                None,
            ),
        )
        .await
        .map_err(|_| PlatformError::Timeout)?;

        match result {
            Err(e) if !is_not_found(&e) => Err(PlatformError::from(e)),
            _ => Ok(()),
        }
    }

    async fn grant_role(
        &self,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), PlatformError> {
        self.bounded(self.http.add_member_role(
            self.guild_id,
            UserId::new(user_id),
            RoleId::new(role_id),
            Some(reason),
        ))
        .await
    }

    async fn revoke_role(
        &self,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), PlatformError> {
        let result = tokio::time::timeout(
            self.timeout,
            self.http.remove_member_role(
                self.guild_id,
                UserId::new(user_id),
                RoleId::new(role_id),
                Some(reason),
            ),
        )
        .await
        .map_err(|_| PlatformError::Timeout)?;

        match result {
            Err(e) if !is_not_found(&e) => Err(PlatformError::from(e)),
            _ => Ok(()),
        }
    }

    async fn direct_message(&self, user_id: u64, notice: &Notice) -> Result<(), PlatformError> {
        let message = CreateMessage::new().embed(build_embed(notice));

        self.bounded(UserId::new(user_id).direct_message(&self.http, message))
            .await?;

        Ok(())
    }
}
