use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::stats::BotStatsDto;

/// Statistics published by the bot process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotStats {
    pub guild_count: u64,
    pub member_count: u64,
    pub commands_handled: u64,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BotStats {
    pub fn into_dto(self) -> BotStatsDto {
        BotStatsDto {
            guild_count: self.guild_count,
            member_count: self.member_count,
            commands_handled: self.commands_handled,
            uptime_seconds: self
                .updated_at
                .signed_duration_since(self.started_at)
                .num_seconds(),
            updated_at: self.updated_at,
        }
    }
}
