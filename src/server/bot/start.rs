use serenity::all::{Client, GatewayIntents};
use std::sync::Arc;

use crate::server::{
    bot::handler::Handler,
    config::Config,
    data::store::JsonStore,
    error::{config::ConfigError, AppError},
    platform::ChatPlatform,
    service::{
        notification::NotificationQueue, role_config::RoleConfigService, stats::BotStatsTracker,
    },
};

/// Builds the gateway client with the leave workflow event handler.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token and guild
/// - `store` - Collection store of this process
/// - `queue` - Notification queue of this process
/// - `role_config` - Cached role configuration
/// - `stats` - Interaction counter and member counts
/// - `platform` - Platform applying the effects of bot-started transitions
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started
/// - `Err(AppError::ConfigErr)` - No bot token or guild configured
/// - `Err(AppError::DiscordErr)` - The client could not be built
pub async fn init_bot(
    config: &Config,
    store: JsonStore,
    queue: NotificationQueue,
    role_config: RoleConfigService,
    stats: Arc<BotStatsTracker>,
    platform: Arc<dyn ChatPlatform>,
) -> Result<Client, AppError> {
    let token = config
        .discord_bot_token
        .as_deref()
        .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?;
    let guild_id = config
        .discord_guild_id
        .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_GUILD_ID".to_string()))?;

    let handler = Handler {
        store,
        queue,
        role_config,
        stats,
        platform,
        guild_id,
    };

    let client = Client::builder(token, GatewayIntents::GUILDS)
        .event_handler(handler)
        .await?;

    Ok(client)
}

/// Connects to the gateway and processes events until the connection ends.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
