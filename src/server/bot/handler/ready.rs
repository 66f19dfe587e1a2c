//! Ready event handler for bot initialization.
//!
//! The ready event fires once per gateway connection. The bot uses it to register the
//! leave slash commands in its guild and to take a first member count for statistics.

use serenity::all::{ActivityData, Context, GuildId, Ready};

use crate::server::bot::{command, handler::Handler};

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `handler` - Bot event handler holding the configured guild
/// - `ctx` - Discord context for registering commands and setting activity
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(handler: &Handler, ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord ({} guilds)",
        ready.user.name,
        ready.guilds.len()
    );

    ctx.set_activity(Some(ActivityData::watching("staff leave requests")));

    let guild_id = GuildId::new(handler.guild_id);

    match guild_id.set_commands(&ctx.http, command::definitions()).await {
        Ok(commands) => tracing::info!(
            "Registered {} commands in guild {}",
            commands.len(),
            guild_id
        ),
        Err(e) => tracing::error!("Failed to register commands in guild {}: {}", guild_id, e),
    }

    match guild_id.to_partial_guild_with_counts(&ctx.http).await {
        Ok(guild) => {
            let members = guild.approximate_member_count.unwrap_or(0);
            handler.stats.set_guild_members(guild_id.get(), members).await;
        }
        Err(e) => tracing::warn!("Failed to fetch member count of guild {}: {}", guild_id, e),
    }
}
