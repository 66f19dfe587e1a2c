use chrono::Utc;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    data::store::JsonStore,
    error::AppError,
    platform::ChatPlatform,
    service::{
        leave::{sweep::SweepSummary, LeaveService},
        notification::NotificationQueue,
        role_config::RoleConfigService,
    },
};

/// Top of every hour.
const SWEEP_SCHEDULE: &str = "0 0 * * * *";

/// Everything one sweep pass needs, cloned into the scheduled job.
#[derive(Clone)]
pub struct SweepContext {
    pub store: JsonStore,
    pub queue: NotificationQueue,
    pub role_config: RoleConfigService,
    pub platform: Arc<dyn ChatPlatform>,
}

/// Runs one sweep right away, then schedules the hourly sweep.
///
/// A failing first pass is logged; the schedule is still installed.
pub async fn start_scheduler(context: SweepContext) -> Result<(), AppError> {
    if let Err(e) = run_sweep(&context).await {
        tracing::error!("Startup expiry sweep failed: {}", e);
    }

    let scheduler = JobScheduler::new().await?;

    let job_context = context.clone();
    let job = Job::new_async(SWEEP_SCHEDULE, move |_uuid, _lock| {
        let context = job_context.clone();

        Box::pin(async move {
            if let Err(e) = run_sweep(&context).await {
                tracing::error!("Expiry sweep failed: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Leave expiry sweep scheduled");

    Ok(())
}

/// Finalizes expired leave with the current role configuration.
pub async fn run_sweep(context: &SweepContext) -> Result<SweepSummary, AppError> {
    let config = context.role_config.get().await?;
    let service = LeaveService::new(
        &context.store,
        &context.queue,
        Some(context.platform.clone()),
        config,
    );

    let summary = service.sweep(Utc::now()).await?;

    if summary.expired > 0 {
        tracing::info!(
            "Expiry sweep removed {} record(s), {} newly notified",
            summary.expired,
            summary.notified
        );
    }

    Ok(summary)
}
