use chrono::{Duration, NaiveDate, Utc};
use std::sync::Arc;

use crate::server::{
    data::{
        leave::LeaveRecordRepository, message_link::MessageLinkRepository,
        role_config::RoleConfigRepository, store::JsonStore,
    },
    error::{leave::LeaveError, AppError},
    model::{
        actor::Actor,
        leave::{DecisionOutcome, ExtendLeaveParam, LeaveCategory, LeaveStatus, SubmitLeaveParam},
        notification::kind,
        role_config::RoleConfig,
        user_permission::DashboardRole,
    },
    platform::{
        recording::{PlatformCall, RecordingPlatform},
        ChatPlatform,
    },
    service::{
        leave::{early_return::EarlyReturnOutcome, LeaveService},
        notification::NotificationQueue,
    },
};
use test_utils::{
    builder::TestBuilder,
    collection,
    context::TestContext,
    factory::{self, leave_record::LeaveRecordFactory, role_config::RoleConfigFactory},
    fixture::{
        date::{days_from_today, ymd},
        discord::{
            ADMIN_USER_ID, APPROVER_ID, APPROVER_ROLE_ID, LEAVE_CHANNEL_ID, LEAVE_ROLE_ID,
            OTHER_STAFF_ID, PING_ROLE_ID, REQUESTER_ID, SECOND_APPROVER_ID, STAFF_CHANNEL_ID,
            STAFF_ROLE_ID,
        },
    },
};

mod delete;
mod extend;
mod request_changes;
mod sweep;

/// Store, queue and recording platform over one test data directory.
struct Harness {
    store: JsonStore,
    queue: NotificationQueue,
    platform: Arc<RecordingPlatform>,
    config: RoleConfig,
}

impl Harness {
    async fn new(test: &TestContext) -> Result<Self, AppError> {
        Self::with_platform(test, RecordingPlatform::new()).await
    }

    async fn with_platform(test: &TestContext, platform: RecordingPlatform) -> Result<Self, AppError> {
        let store = JsonStore::open(test.data_dir()).await?;
        let config = RoleConfigRepository::new(&store).get().await?;
        let queue = NotificationQueue::new(store.clone());

        Ok(Self {
            store,
            queue,
            platform: Arc::new(platform),
            config,
        })
    }

    /// Service applying effects inline on the recording platform.
    fn service(&self) -> LeaveService<'_> {
        let platform: Arc<dyn ChatPlatform> = self.platform.clone();
        LeaveService::new(&self.store, &self.queue, Some(platform), self.config.clone())
    }

    /// Service without a platform, as in a dashboard-only process.
    fn offline(&self) -> LeaveService<'_> {
        LeaveService::new(&self.store, &self.queue, None, self.config.clone())
    }
}

fn staff(user_id: u64) -> Actor {
    Actor::chat(user_id, format!("Staff {}", user_id), vec![STAFF_ROLE_ID])
}

fn approver(user_id: u64) -> Actor {
    Actor::chat(
        user_id,
        format!("Approver {}", user_id),
        vec![STAFF_ROLE_ID, APPROVER_ROLE_ID],
    )
}

fn request(start: NaiveDate, end: NaiveDate) -> SubmitLeaveParam {
    SubmitLeaveParam {
        start_date: start.format("%Y-%m-%d").to_string(),
        end_date: end.format("%Y-%m-%d").to_string(),
        reason: "Family trip".to_string(),
        category: LeaveCategory::Vacation,
        is_private: false,
    }
}

/// Envelope types currently in the queue log, in append order.
fn queued_kinds(test: &TestContext) -> Vec<String> {
    test.read_collection(collection::NOTIFICATIONS)
        .unwrap()
        .as_array()
        .map(|log| {
            log.iter()
                .filter_map(|e| e["type"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn active_count(test: &TestContext) -> usize {
    test.read_collection(collection::ACTIVE_LEAVES)
        .unwrap()
        .as_array()
        .map(|records| records.len())
        .unwrap_or(0)
}
