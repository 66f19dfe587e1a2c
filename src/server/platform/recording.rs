//! In-memory chat platform that records every call.

use serenity::async_trait;
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Mutex,
};

use crate::server::{
    error::platform::PlatformError,
    platform::{ChatPlatform, Notice},
};

/// A call observed by [`RecordingPlatform`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Post {
        channel_id: u64,
        message_id: u64,
        notice: Notice,
    },
    Edit {
        channel_id: u64,
        message_id: u64,
        notice: Notice,
    },
    Delete {
        channel_id: u64,
        message_id: u64,
    },
    Grant {
        user_id: u64,
        role_id: u64,
    },
    Revoke {
        user_id: u64,
        role_id: u64,
    },
    DirectMessage {
        user_id: u64,
        notice: Notice,
    },
}

/// Test double of the chat platform.
///
/// Calls are recorded even when the platform is told to fail them.
#[derive(Default)]
pub struct RecordingPlatform {
    calls: Mutex<Vec<PlatformCall>>,
    next_message_id: AtomicU64,
    pub fail_posts: AtomicBool,
    pub fail_edits: AtomicBool,
    pub fail_roles: AtomicBool,
    pub fail_direct_messages: AtomicBool,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self {
            next_message_id: AtomicU64::new(5_000),
            ..Default::default()
        }
    }

    /// A platform on which every call fails.
    pub fn failing() -> Self {
        let platform = Self::new();
        platform.fail_posts.store(true, Ordering::SeqCst);
        platform.fail_edits.store(true, Ordering::SeqCst);
        platform.fail_roles.store(true, Ordering::SeqCst);
        platform.fail_direct_messages.store(true, Ordering::SeqCst);
        platform
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn grants(&self) -> Vec<(u64, u64)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::Grant { user_id, role_id } => Some((user_id, role_id)),
                _ => None,
            })
            .collect()
    }

    pub fn revokes(&self) -> Vec<(u64, u64)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::Revoke { user_id, role_id } => Some((user_id, role_id)),
                _ => None,
            })
            .collect()
    }

    pub fn posts(&self) -> Vec<(u64, Notice)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::Post {
                    channel_id, notice, ..
                } => Some((channel_id, notice)),
                _ => None,
            })
            .collect()
    }

    pub fn edits(&self) -> Vec<(u64, Notice)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::Edit {
                    message_id, notice, ..
                } => Some((message_id, notice)),
                _ => None,
            })
            .collect()
    }

    pub fn direct_messages_to(&self, user_id: u64) -> Vec<Notice> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::DirectMessage { user_id: to, notice } if to == user_id => {
                    Some(notice)
                }
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: PlatformCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(flag: &AtomicBool) -> Result<(), PlatformError> {
        if flag.load(Ordering::SeqCst) {
            Err(PlatformError::Timeout)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ChatPlatform for RecordingPlatform {
    async fn post_notice(&self, channel_id: u64, notice: &Notice) -> Result<u64, PlatformError> {
        let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        self.record(PlatformCall::Post {
            channel_id,
            message_id,
            notice: notice.clone(),
        });
        Self::check(&self.fail_posts)?;
        Ok(message_id)
    }

    async fn edit_notice(
        &self,
        channel_id: u64,
        message_id: u64,
        notice: &Notice,
    ) -> Result<(), PlatformError> {
        self.record(PlatformCall::Edit {
            channel_id,
            message_id,
            notice: notice.clone(),
        });
        Self::check(&self.fail_edits)
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), PlatformError> {
        self.record(PlatformCall::Delete {
            channel_id,
            message_id,
        });
        Self::check(&self.fail_edits)
    }

    async fn grant_role(
        &self,
        user_id: u64,
        role_id: u64,
        _reason: &str,
    ) -> Result<(), PlatformError> {
        self.record(PlatformCall::Grant { user_id, role_id });
        Self::check(&self.fail_roles)
    }

    async fn revoke_role(
        &self,
        user_id: u64,
        role_id: u64,
        _reason: &str,
    ) -> Result<(), PlatformError> {
        self.record(PlatformCall::Revoke { user_id, role_id });
        Self::check(&self.fail_roles)
    }

    async fn direct_message(&self, user_id: u64, notice: &Notice) -> Result<(), PlatformError> {
        self.record(PlatformCall::DirectMessage {
            user_id,
            notice: notice.clone(),
        });
        Self::check(&self.fail_direct_messages)
    }
}
