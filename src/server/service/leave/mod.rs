//! Leave of absence lifecycle.
//!
//! `LeaveService` owns every transition of a leave record: submission, decision, change
//! requests, extension, early return, deletion and the expiry sweep. Each operation
//! authorizes the actor, validates its input and commits the record change under the
//! collection's write lock before anything leaves the process. Only then is the
//! resulting [`LeaveEvent`] published:
//!
//! - a `loa_status_update` envelope is always queued for the dashboard's live feed;
//! - with a chat platform at hand the effects are applied inline through [`LeaveEffects`];
//! - without one the event is queued as a `loa_effect` envelope for the bot to apply.
//!
//! The service is organized into separate modules by operation:
//! - `submit` - New requests
//! - `decide` - Approve and deny
//! - `request_changes` - Change requests from approvers
//! - `extend` - Moving the end date of one's own leave
//! - `early_return` - Ending one's own leave early
//! - `delete` - Removing a record from the dashboard
//! - `list` - Visible records for an actor
//! - `sweep` - Expiry of records past their end date
//! - `effects` - Platform side effects of events
//! - `notice` - Announcement and message builders

pub mod decide;
pub mod delete;
pub mod early_return;
pub mod effects;
pub mod extend;
pub mod list;
pub mod notice;
pub mod request_changes;
pub mod submit;
pub mod sweep;

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;

use crate::server::{
    data::{history::LeaveHistoryRepository, store::JsonStore},
    model::{
        event::LeaveEvent,
        leave::{LeaveRecord, RemovalReason},
        notification::kind,
        role_config::RoleConfig,
    },
    platform::ChatPlatform,
    service::{leave::effects::LeaveEffects, notification::NotificationQueue},
};

/// Service providing the leave workflow operations.
///
/// Built per request or per interaction with a snapshot of the role configuration, so
/// every check within one operation sees the same configuration.
pub struct LeaveService<'a> {
    /// Collection store holding records, history and announcement links
    store: &'a JsonStore,
    /// Queue receiving status updates and, without a platform, deferred effects
    queue: &'a NotificationQueue,
    /// Chat platform for inline effects, absent in a dashboard without a bot token
    platform: Option<Arc<dyn ChatPlatform>>,
    config: RoleConfig,
}

impl<'a> LeaveService<'a> {
    /// Creates a new LeaveService instance.
    ///
    /// # Arguments
    /// - `store` - Reference to the collection store
    /// - `queue` - Notification queue of the calling process
    /// - `platform` - Chat platform for inline effects, if this process has one
    /// - `config` - Role configuration snapshot
    ///
    /// # Returns
    /// - `LeaveService` - New service instance
    pub fn new(
        store: &'a JsonStore,
        queue: &'a NotificationQueue,
        platform: Option<Arc<dyn ChatPlatform>>,
        config: RoleConfig,
    ) -> Self {
        Self {
            store,
            queue,
            platform,
            config,
        }
    }

    /// Announces a committed transition and applies or defers its effects.
    async fn publish(&self, event: LeaveEvent) {
        let update = event.status_update(Utc::now());
        self.queue.enqueue(kind::LEAVE_STATUS_UPDATE, &update).await;

        match &self.platform {
            Some(platform) => {
                LeaveEffects::new(self.store, platform.as_ref(), &self.config)
                    .apply(&event)
                    .await;
            }
            None => {
                if !self.queue.enqueue(kind::LEAVE_EFFECT, &event).await {
                    tracing::warn!(
                        "Effects of {} for user {} could not be queued",
                        event.action(),
                        event.user_id()
                    );
                }
            }
        }
    }

    /// Moves a removed record into the history collection.
    ///
    /// The record has already left the active collection; a failure here only loses the
    /// archive entry and is logged.
    async fn archive(&self, record: &LeaveRecord, reason: RemovalReason, at: DateTime<Utc>) {
        let removed = record.clone().into_removed(reason, at);

        if let Err(e) = LeaveHistoryRepository::new(self.store)
            .archive(vec![removed])
            .await
        {
            tracing::error!("Failed to archive {} for user {}: {}", record.id, record.user_id, e);
        }
    }
}

/// Drops a pending revocation when another active record still holds the role.
///
/// `records` is the active collection after the transition has been applied, so the
/// record being ended is no longer counted.
fn releasable_role(
    records: &[LeaveRecord],
    user_id: u64,
    role_id: Option<u64>,
    today: NaiveDate,
) -> Option<u64> {
    role_id.filter(|role_id| {
        !records
            .iter()
            .any(|r| r.user_id == user_id && r.holds_role(*role_id, today))
    })
}

/// Normalizes free text input, treating blank text as absent.
fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
