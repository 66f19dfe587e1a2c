use chrono::Utc;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    model::notification::kind,
    service::{notification::NotificationQueue, stats::BotStatsTracker},
};

const PUBLISH_SCHEDULE: &str = "0 * * * * *";

/// Publishes bot statistics to the dashboard every minute.
pub async fn start_scheduler(
    queue: NotificationQueue,
    stats: Arc<BotStatsTracker>,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(PUBLISH_SCHEDULE, move |_uuid, _lock| {
        let queue = queue.clone();
        let stats = stats.clone();

        Box::pin(async move {
            publish(&queue, &stats).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Bot statistics publication scheduled");

    Ok(())
}

/// Appends a `bot_stats_update` envelope with the current statistics.
pub async fn publish(queue: &NotificationQueue, stats: &BotStatsTracker) -> bool {
    let snapshot = stats.snapshot(Utc::now()).await;

    let queued = queue.enqueue(kind::BOT_STATS_UPDATE, &snapshot).await;
    if !queued {
        tracing::warn!("Bot statistics could not be queued");
    }

    queued
}
