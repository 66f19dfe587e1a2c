use serenity::all::{Context, Guild};

use crate::server::bot::handler::Handler;

/// Handles the guild_create event, keeping the member count used for statistics current.
///
/// # Arguments
/// - `handler` - Bot event handler holding the statistics tracker
/// - `_ctx` - Discord context (unused)
/// - `guild` - Guild that became available
/// - `_is_new` - Whether the bot just joined the guild
pub async fn handle_guild_create(
    handler: &Handler,
    _ctx: Context,
    guild: Guild,
    _is_new: Option<bool>,
) {
    tracing::debug!(
        "Guild create event: {} ({}) - member_count: {}",
        guild.name,
        guild.id,
        guild.member_count
    );

    handler
        .stats
        .set_guild_members(guild.id.get(), guild.member_count)
        .await;
}
