//! Fan-out of live dashboard events.
//!
//! The dashboard drain feeds status updates and bot statistics into the hub; every
//! connected WebSocket holds a broadcast receiver.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use crate::{
    model::{
        api::LiveEventDto,
        leave::RecordStatusChangedDto,
        stats::StatsDto,
    },
    server::{
        data::{leave::LeaveRecordRepository, store::JsonStore},
        error::store::StoreError,
        model::{
            notification::{kind, Envelope},
            stats::BotStats,
        },
        service::{
            notification::{handler, NotificationQueue},
            stats::leave_counts,
        },
    },
};

const CHANNEL_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct LiveHub {
    store: JsonStore,
    sender: broadcast::Sender<LiveEventDto>,
    bot_stats: Arc<RwLock<Option<BotStats>>>,
}

impl LiveHub {
    pub fn new(store: JsonStore) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);

        Self {
            store,
            sender,
            bot_stats: Arc::new(RwLock::new(None)),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LiveEventDto> {
        self.sender.subscribe()
    }

    /// Sends an event to every connected client. Having no clients is not an error.
    pub fn publish(&self, event: LiveEventDto) {
        let _ = self.sender.send(event);
    }

    /// Stores the latest bot statistics and pushes a fresh snapshot.
    pub async fn set_bot_stats(&self, stats: BotStats) -> Result<(), StoreError> {
        *self.bot_stats.write().await = Some(stats);

        let snapshot = self.snapshot().await?;
        self.publish(LiveEventDto::Stats(snapshot));

        Ok(())
    }

    /// Builds the statistics shown on the dashboard.
    ///
    /// # Returns
    /// - `Ok(StatsDto)` - Leave counts plus the last bot statistics, if any arrived yet
    /// - `Err(StoreError)` - The active collection could not be read
    pub async fn snapshot(&self) -> Result<StatsDto, StoreError> {
        let now = Utc::now();
        let records = LeaveRecordRepository::new(&self.store).all().await?;
        let bot = self.bot_stats.read().await.clone();

        Ok(StatsDto {
            bot: bot.map(BotStats::into_dto),
            leaves: leave_counts(&records, now.date_naive()),
            generated_at: now,
        })
    }

    /// Registers the dashboard-side envelope handlers on a queue.
    pub async fn register_handlers(&self, queue: &NotificationQueue) {
        let hub = self.clone();
        queue
            .register(
                kind::LEAVE_STATUS_UPDATE,
                handler(move |envelope: Envelope| {
                    let hub = hub.clone();
                    async move {
                        let update: RecordStatusChangedDto = envelope.payload_as()?;
                        hub.publish(LiveEventDto::RecordStatusChanged(update));
                        Ok(())
                    }
                }),
            )
            .await;

        let hub = self.clone();
        queue
            .register(
                kind::BOT_STATS_UPDATE,
                handler(move |envelope: Envelope| {
                    let hub = hub.clone();
                    async move {
                        let stats: BotStats = envelope.payload_as()?;
                        hub.set_bot_stats(stats).await?;
                        Ok(())
                    }
                }),
            )
            .await;
    }
}
