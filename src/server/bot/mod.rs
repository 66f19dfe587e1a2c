//! Discord bot integration for the leave workflow.
//!
//! The bot is the chat-side inbound surface: it registers the leave slash commands in the
//! configured guild, routes commands, announcement buttons and the change request modal
//! to the leave service, and counts handled interactions for statistics.
//!
//! The bot runs in its own tokio task next to the dashboard server when both are enabled.
//! Effects of transitions it starts are applied through the shared [`DiscordPlatform`]
//! REST client, not through the gateway context.
//!
//! # Gateway Intents
//!
//! Interactions are delivered without any intent. The bot only requests:
//! - `GUILDS` - Guild availability, used for member counts
//!
//! [`DiscordPlatform`]: crate::server::platform::discord::DiscordPlatform

pub mod command;
pub mod component;
pub mod handler;
pub mod start;
