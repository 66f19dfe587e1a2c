//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and cloned into each handler through
//! Axum's state extraction. Every field is cheap to clone: the store, queue and caches
//! share their internals behind `Arc`s.

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use std::sync::Arc;

use crate::server::{
    data::store::JsonStore,
    error::AppError,
    platform::ChatPlatform,
    service::{
        leave::LeaveService, live::LiveHub, notification::NotificationQueue,
        role_config::RoleConfigService, user_permission::PermissionService,
    },
};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

#[derive(Clone)]
pub struct AppState {
    /// Collection files in the data directory.
    pub store: JsonStore,

    /// Queue of the dashboard process. Status updates and deferred effects are
    /// appended here; the dashboard drain consumes the live-update kinds.
    pub queue: NotificationQueue,

    pub role_config: RoleConfigService,
    pub permissions: PermissionService,

    /// Fan-out to connected WebSocket clients.
    pub live: LiveHub,

    /// Chat platform for inline effects. `None` when no bot token is configured, in
    /// which case effects travel to the bot as queue envelopes.
    pub platform: Option<Arc<dyn ChatPlatform>>,

    /// HTTP client for Discord's user API. Redirects are disabled.
    pub http_client: reqwest::Client,

    pub oauth_client: OAuth2Client,

    /// Dashboard base URL; the OAuth callback redirects here.
    pub app_url: String,
}

impl AppState {
    /// Builds a leave service over a fresh role configuration snapshot.
    pub async fn leave_service(&self) -> Result<LeaveService<'_>, AppError> {
        let config = self.role_config.get().await?;

        Ok(LeaveService::new(
            &self.store,
            &self.queue,
            self.platform.clone(),
            config,
        ))
    }
}
