//! Platform side effects of committed leave transitions.
//!
//! Effects run after the record write and never fail: every platform error is logged and
//! dropped, so a missing permission or a deleted role cannot undo a decision.

use chrono::Utc;
use rand::seq::IndexedRandom;

use crate::server::{
    data::{message_link::MessageLinkRepository, store::JsonStore},
    model::{
        event::LeaveEvent,
        leave::LeaveRecord,
        message_link::MessageLink,
        role_config::RoleConfig,
    },
    platform::{ChatPlatform, Notice},
    service::leave::notice,
};

pub struct LeaveEffects<'a> {
    store: &'a JsonStore,
    platform: &'a dyn ChatPlatform,
    config: &'a RoleConfig,
}

impl<'a> LeaveEffects<'a> {
    pub fn new(store: &'a JsonStore, platform: &'a dyn ChatPlatform, config: &'a RoleConfig) -> Self {
        Self {
            store,
            platform,
            config,
        }
    }

    /// Applies the effects of one event.
    pub async fn apply(&self, event: &LeaveEvent) {
        match event {
            LeaveEvent::Created { record } => {
                if !record.is_private {
                    self.announce(record).await;
                }
                self.notify_random_admin(&notice::admin_request(record))
                    .await;
                self.direct_message(record.user_id, &notice::receipt(record))
                    .await;
            }
            LeaveEvent::Decided {
                record,
                revoke_role_id,
            } => {
                if record.status.is_approved() {
                    if let Some(role_id) = record.granted_role_id {
                        self.grant(record, role_id).await;
                    }
                }
                if let Some(role_id) = revoke_role_id {
                    self.revoke(record.user_id, *role_id, &record.id).await;
                }
                self.edit_announcement(record, &notice::decided(record))
                    .await;
                self.direct_message(record.user_id, &notice::decision_dm(record))
                    .await;
            }
            LeaveEvent::ChangesRequested {
                record,
                comment,
                by_name,
            } => {
                self.edit_announcement(record, &notice::changes_requested(record, comment, by_name))
                    .await;
                self.direct_message(record.user_id, &notice::changes_dm(record, comment, by_name))
                    .await;
            }
            LeaveEvent::Extended {
                record,
                previous_end,
                reason,
            } => {
                let extension = notice::extension(record, *previous_end, reason);
                if !record.is_private {
                    if let Some(channel_id) = self.config.leave_channel_id {
                        self.post(channel_id, &extension, &record.id).await;
                    }
                }
                self.notify_random_admin(&extension).await;
            }
            LeaveEvent::Returned {
                user_id,
                username,
                record,
                comment,
                revoke_role_id,
            } => {
                let leave_id = record.as_ref().map(|r| r.id.as_str()).unwrap_or("role only");
                if let Some(role_id) = revoke_role_id {
                    self.revoke(*user_id, *role_id, leave_id).await;
                }

                let returned =
                    notice::returned(*user_id, username, record.as_ref(), comment.as_deref());
                let channel = self
                    .config
                    .staff_channel_id
                    .or(self.config.leave_channel_id);
                if let Some(channel_id) = channel {
                    self.post(channel_id, &returned, leave_id).await;
                }
            }
            LeaveEvent::Expired {
                record,
                revoke_role_id,
            } => {
                match revoke_role_id {
                    Some(role_id) => self.revoke(record.user_id, *role_id, &record.id).await,
                    None if record.granted_role_id.is_some() => {
                        // A newer leave of the same user holds the role.
                        tracing::debug!("Leave {} expired while superseded", record.id);
                        return;
                    }
                    None => {}
                }
                self.direct_message(record.user_id, &notice::expired_dm(record))
                    .await;
            }
            LeaveEvent::Deleted {
                record,
                by_name,
                revoke_role_id,
            } => {
                self.delete_announcement(record).await;
                if let Some(role_id) = revoke_role_id {
                    self.revoke(record.user_id, *role_id, &record.id).await;
                }
                self.direct_message(record.user_id, &notice::deleted_dm(record, by_name))
                    .await;
            }
        }
    }

    /// Posts the announcement of a new request and remembers where it went.
    async fn announce(&self, record: &LeaveRecord) {
        let Some(channel_id) = self.config.leave_channel_id else {
            tracing::debug!("No leave channel configured, {} not announced", record.id);
            return;
        };

        let announcement = notice::announcement(record, self.config);
        let Some(message_id) = self.post(channel_id, &announcement, &record.id).await else {
            return;
        };

        let link = MessageLink {
            channel_id,
            message_id,
            created_at: Utc::now(),
        };
        if let Err(e) = MessageLinkRepository::new(self.store)
            .upsert(&record.id, link)
            .await
        {
            tracing::error!("Failed to store announcement link for {}: {}", record.id, e);
        }
    }

    async fn post(&self, channel_id: u64, notice: &Notice, leave_id: &str) -> Option<u64> {
        match self.platform.post_notice(channel_id, notice).await {
            Ok(message_id) => Some(message_id),
            Err(e) => {
                tracing::error!(
                    "Failed to post \"{}\" for {} to channel {}: {}",
                    notice.title,
                    leave_id,
                    channel_id,
                    e
                );
                None
            }
        }
    }

    async fn edit_announcement(&self, record: &LeaveRecord, notice: &Notice) {
        let link = match MessageLinkRepository::new(self.store).find(&record.id).await {
            Ok(Some(link)) => link,
            Ok(None) => return,
            Err(e) => {
                tracing::error!("Failed to load announcement link for {}: {}", record.id, e);
                return;
            }
        };

        if let Err(e) = self
            .platform
            .edit_notice(link.channel_id, link.message_id, notice)
            .await
        {
            tracing::warn!(
                "Failed to update announcement {} for {}: {}",
                link.message_id,
                record.id,
                e
            );
        }
    }

    async fn delete_announcement(&self, record: &LeaveRecord) {
        let link = match MessageLinkRepository::new(self.store).remove(&record.id).await {
            Ok(Some(link)) => link,
            Ok(None) => return,
            Err(e) => {
                tracing::error!("Failed to remove announcement link for {}: {}", record.id, e);
                return;
            }
        };

        if let Err(e) = self
            .platform
            .delete_message(link.channel_id, link.message_id)
            .await
        {
            tracing::warn!(
                "Failed to delete announcement {} for {}: {}",
                link.message_id,
                record.id,
                e
            );
        }
    }

    async fn grant(&self, record: &LeaveRecord, role_id: u64) {
        let reason = format!(
            "LOA {} from {} to {}",
            record.id,
            notice::format_date(record.start_date),
            notice::format_date(record.end_date)
        );

        match self.platform.grant_role(record.user_id, role_id, &reason).await {
            Ok(()) => tracing::info!(
                "Granted leave role {} to user {} for {}",
                role_id,
                record.user_id,
                record.id
            ),
            Err(e) => tracing::error!(
                "Failed to grant leave role {} to user {} for {}: {}",
                role_id,
                record.user_id,
                record.id,
                e
            ),
        }
    }

    async fn revoke(&self, user_id: u64, role_id: u64, leave_id: &str) {
        let reason = format!("LOA {} ended", leave_id);

        match self.platform.revoke_role(user_id, role_id, &reason).await {
            Ok(()) => tracing::info!(
                "Revoked leave role {} from user {} for {}",
                role_id,
                user_id,
                leave_id
            ),
            Err(e) => tracing::error!(
                "Failed to revoke leave role {} from user {} for {}: {}",
                role_id,
                user_id,
                leave_id,
                e
            ),
        }
    }

    async fn direct_message(&self, user_id: u64, notice: &Notice) {
        if let Err(e) = self.platform.direct_message(user_id, notice).await {
            tracing::warn!(
                "Failed to send \"{}\" to user {}: {}",
                notice.title,
                user_id,
                e
            );
        }
    }

    /// Sends a notice to one configured administrator picked at random.
    async fn notify_random_admin(&self, notice: &Notice) {
        let admin = self.config.admin_user_ids.choose(&mut rand::rng()).copied();

        match admin {
            Some(user_id) => self.direct_message(user_id, notice).await,
            None => tracing::debug!("No administrators configured, skipping \"{}\"", notice.title),
        }
    }
}
