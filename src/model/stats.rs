use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    /// Last statistics published by the bot, absent until the first publication arrives.
    pub bot: Option<BotStatsDto>,
    pub leaves: LeaveCountsDto,
    pub generated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BotStatsDto {
    pub guild_count: u64,
    pub member_count: u64,
    pub commands_handled: u64,
    pub uptime_seconds: i64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LeaveCountsDto {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub denied: usize,
    /// Approved and currently within their date range.
    pub active: usize,
    /// Approved and starting in the future.
    pub scheduled: usize,
}
