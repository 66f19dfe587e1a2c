use serenity::all::{Context, EventHandler, Guild, Interaction, Ready};
use serenity::async_trait;
use std::sync::Arc;

use crate::server::{
    data::store::JsonStore,
    platform::ChatPlatform,
    service::{notification::NotificationQueue, role_config::RoleConfigService, stats::BotStatsTracker},
};

pub mod guild;
pub mod interaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub store: JsonStore,
    pub queue: NotificationQueue,
    pub role_config: RoleConfigService,
    pub stats: Arc<BotStatsTracker>,
    /// Platform used for the effects of transitions started by interactions
    pub platform: Arc<dyn ChatPlatform>,
    /// Guild the leave commands are registered in
    pub guild_id: u64,
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(self, ctx, ready).await;
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        guild::handle_guild_create(self, ctx, guild, is_new).await;
    }

    /// Called for slash commands, button clicks and modal submissions
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(self, ctx, interaction).await;
    }
}
