use chrono::Utc;
use std::sync::Arc;

use crate::{
    model::api::LiveEventDto,
    server::{
        data::store::JsonStore,
        error::AppError,
        model::{
            actor::Actor,
            leave::{LeaveCategory, SubmitLeaveParam},
            notification::kind,
        },
        platform::{recording::RecordingPlatform, ChatPlatform},
        scheduler::{
            bot_stats,
            leave_sweep::{run_sweep, SweepContext},
            queue_drain::register_effect_handler,
        },
        service::{
            leave::LeaveService, live::LiveHub, notification::NotificationQueue,
            role_config::RoleConfigService, stats::BotStatsTracker,
        },
    },
};
use test_utils::{
    builder::TestBuilder,
    collection,
    factory::leave_record::LeaveRecordFactory,
    fixture::{
        date::days_from_today,
        discord::{
            APPROVER_ID, GUILD_ID, LEAVE_CHANNEL_ID, LEAVE_ROLE_ID, REQUESTER_ID, STAFF_ROLE_ID,
        },
    },
};
