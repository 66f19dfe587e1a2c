use std::{sync::Arc, time::Duration};

use crate::server::{
    data::store::JsonStore,
    model::{
        event::LeaveEvent,
        notification::{kind, Envelope},
    },
    platform::ChatPlatform,
    service::{
        leave::effects::LeaveEffects,
        notification::{handler, NotificationQueue},
        role_config::RoleConfigService,
    },
};

pub const BOT_DRAIN_INTERVAL: Duration = Duration::from_secs(30);
pub const DASHBOARD_DRAIN_INTERVAL: Duration = Duration::from_secs(2);

/// Registers the bot-side handler applying deferred `loa_effect` envelopes.
///
/// The role configuration is read when the envelope is handled, so effects use the
/// settings current at that time. A configuration read failure leaves the envelope for
/// the next drain.
pub async fn register_effect_handler(
    queue: &NotificationQueue,
    store: JsonStore,
    role_config: RoleConfigService,
    platform: Arc<dyn ChatPlatform>,
) {
    queue
        .register(
            kind::LEAVE_EFFECT,
            handler(move |envelope: Envelope| {
                let store = store.clone();
                let role_config = role_config.clone();
                let platform = platform.clone();

                async move {
                    let event: LeaveEvent = envelope.payload_as()?;
                    let config = role_config.get().await?;

                    LeaveEffects::new(&store, platform.as_ref(), &config)
                        .apply(&event)
                        .await;

                    Ok(())
                }
            }),
        )
        .await;
}

/// Drains `queue` every `period` until the process exits.
pub fn spawn_drain(queue: NotificationQueue, period: Duration, label: &'static str) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);

        loop {
            ticker.tick().await;

            match queue.drain(None).await {
                Ok(0) => {}
                Ok(processed) => {
                    tracing::debug!("{} drain processed {} envelope(s)", label, processed)
                }
                Err(e) => tracing::error!("{} drain failed: {}", label, e),
            }
        }
    });

    tracing::info!("{} queue drain running every {:?}", label, period);
}
