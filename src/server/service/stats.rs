//! Bot statistics tracking and leave counts.

use chrono::{DateTime, NaiveDate, Utc};
use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};
use tokio::sync::RwLock;

use crate::{
    model::stats::LeaveCountsDto,
    server::model::{
        leave::{LeaveRecord, LeaveStatus, TemporalState},
        stats::BotStats,
    },
};

/// Live counters maintained by the bot process.
pub struct BotStatsTracker {
    started_at: DateTime<Utc>,
    commands_handled: AtomicU64,
    guild_members: RwLock<HashMap<u64, u64>>,
}

impl BotStatsTracker {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            commands_handled: AtomicU64::new(0),
            guild_members: RwLock::new(HashMap::new()),
        }
    }

    /// Counts one handled slash command, button or modal submission.
    pub fn record_command(&self) {
        self.commands_handled.fetch_add(1, Ordering::Relaxed);
    }

    /// Records the member count of a guild the bot is in.
    pub async fn set_guild_members(&self, guild_id: u64, member_count: u64) {
        self.guild_members
            .write()
            .await
            .insert(guild_id, member_count);
    }

    pub async fn snapshot(&self, now: DateTime<Utc>) -> BotStats {
        let guilds = self.guild_members.read().await;

        BotStats {
            guild_count: guilds.len() as u64,
            member_count: guilds.values().sum(),
            commands_handled: self.commands_handled.load(Ordering::Relaxed),
            started_at: self.started_at,
            updated_at: now,
        }
    }
}

/// Counts active records by status and, for approved ones, by temporal state.
pub fn leave_counts(records: &[LeaveRecord], today: NaiveDate) -> LeaveCountsDto {
    let mut counts = LeaveCountsDto {
        total: records.len(),
        ..Default::default()
    };

    for record in records {
        match record.status {
            LeaveStatus::Pending => counts.pending += 1,
            LeaveStatus::Denied(_) => counts.denied += 1,
            LeaveStatus::Approved(_) => {
                counts.approved += 1;
                match record.temporal_state(today) {
                    TemporalState::Active => counts.active += 1,
                    TemporalState::Scheduled => counts.scheduled += 1,
                    TemporalState::Expired => {}
                }
            }
            LeaveStatus::Removed { .. } => {}
        }
    }

    counts
}
