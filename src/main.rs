mod model;
mod server;

use serenity::http::Http;
use std::sync::Arc;

use crate::server::{
    bot,
    config::Config,
    data::store::JsonStore,
    error::{config::ConfigError, AppError},
    platform::{discord::DiscordPlatform, ChatPlatform},
    router,
    scheduler::{bot_stats, leave_sweep, queue_drain},
    service::{
        live::LiveHub, notification::NotificationQueue, role_config::RoleConfigService,
        stats::BotStatsTracker, user_permission::PermissionService,
    },
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;
    let store = startup::open_store(&config).await?;
    let role_config = RoleConfigService::new(store.clone());

    let platform: Option<Arc<dyn ChatPlatform>> =
        match (&config.discord_bot_token, config.discord_guild_id) {
            (Some(token), Some(guild_id)) => Some(Arc::new(DiscordPlatform::new(
                Arc::new(Http::new(token)),
                guild_id,
            ))),
            _ => None,
        };

    let bot_client = if config.run_bot {
        let platform = platform
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?;
        Some(start_bot_side(&config, &store, &role_config, platform).await?)
    } else {
        None
    };

    match (config.run_dashboard, bot_client) {
        (true, bot_client) => {
            if let Some(client) = bot_client {
                tokio::spawn(async move {
                    if let Err(e) = bot::start::start_bot(client).await {
                        tracing::error!("Discord bot error: {}", e);
                    }
                });
            }

            serve_dashboard(&config, store, role_config, platform).await
        }
        (false, Some(client)) => bot::start::start_bot(client).await,
        (false, None) => {
            tracing::warn!("Both RUN_BOT and RUN_DASHBOARD are disabled; nothing to do");
            Ok(())
        }
    }
}

/// Starts the bot's jobs and builds its gateway client.
///
/// The bot owns the expiry sweep, statistics publication and the drain applying
/// deferred `loa_effect` envelopes.
async fn start_bot_side(
    config: &Config,
    store: &JsonStore,
    role_config: &RoleConfigService,
    platform: Arc<dyn ChatPlatform>,
) -> Result<serenity::all::Client, AppError> {
    let queue = NotificationQueue::new(store.clone());
    let stats = Arc::new(BotStatsTracker::new(chrono::Utc::now()));

    queue_drain::register_effect_handler(
        &queue,
        store.clone(),
        role_config.clone(),
        platform.clone(),
    )
    .await;
    queue_drain::spawn_drain(queue.clone(), queue_drain::BOT_DRAIN_INTERVAL, "Bot");

    leave_sweep::start_scheduler(leave_sweep::SweepContext {
        store: store.clone(),
        queue: queue.clone(),
        role_config: role_config.clone(),
        platform: platform.clone(),
    })
    .await?;
    bot_stats::start_scheduler(queue.clone(), stats.clone()).await?;

    bot::start::init_bot(
        config,
        store.clone(),
        queue,
        role_config.clone(),
        stats,
        platform,
    )
    .await
}

/// Serves the dashboard API until the listener fails.
async fn serve_dashboard(
    config: &Config,
    store: JsonStore,
    role_config: RoleConfigService,
    platform: Option<Arc<dyn ChatPlatform>>,
) -> Result<(), AppError> {
    let queue = NotificationQueue::new(store.clone());
    let live = LiveHub::new(store.clone());

    live.register_handlers(&queue).await;
    queue_drain::spawn_drain(
        queue.clone(),
        queue_drain::DASHBOARD_DRAIN_INTERVAL,
        "Dashboard",
    );

    if platform.is_none() {
        tracing::info!("No bot token configured; leave effects will be queued for the bot");
    }

    let state = AppState {
        permissions: PermissionService::new(store.clone()),
        store,
        queue,
        role_config,
        live,
        platform,
        http_client: startup::setup_reqwest_client()?,
        oauth_client: startup::setup_oauth_client(config)?,
        app_url: config.app_url.clone(),
    };

    let app = router::router()
        .with_state(state)
        .layer(startup::session_layer(config))
        .layer(startup::cors_layer(config)?);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Dashboard listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
