use axum::http::{header, HeaderValue, Method};
use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use std::time::Duration;
use tower_http::cors::CorsLayer;
use time::Duration as SessionDuration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    data::{
        role_config::RoleConfigRepository, store::JsonStore,
        user_permission::UserPermissionRepository,
    },
    error::{config::ConfigError, AppError},
    state::OAuth2Client,
};

const DEFAULT_LOG_FILTER: &str = "info,serenity=warn";
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);
const SESSION_INACTIVITY_DAYS: i64 = 7;

/// Installs the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Opens the data directory and seeds first-run state.
///
/// The role configuration file is written from the environment only when it does not
/// exist yet; afterwards the file is authoritative. Configured super admins lacking an
/// assignment are added to the user-role map.
///
/// # Arguments
/// - `config` - Application configuration holding the data directory and seed values
///
/// # Returns
/// - `Ok(JsonStore)` - Store over the (created if missing) data directory
/// - `Err(AppError::StoreErr)` - The directory or a seed file could not be written
pub async fn open_store(config: &Config) -> Result<JsonStore, AppError> {
    let store = JsonStore::open(&config.data_dir).await?;

    if RoleConfigRepository::new(&store)
        .seed_if_missing(&config.role_config_seed)
        .await?
    {
        tracing::info!("Seeded role configuration from environment");
    }

    let seeded = UserPermissionRepository::new(&store)
        .seed_super_admins(&config.super_admin_ids, chrono::Utc::now())
        .await?;
    if seeded > 0 {
        tracing::info!("Granted super admin to {} configured user(s)", seeded);
    }

    tracing::info!("Using data directory {}", store.dir().display());

    Ok(store)
}

/// Builds the in-memory session layer.
///
/// Sessions expire after seven days without activity. Cookies are marked secure only
/// when the dashboard is served over HTTPS.
pub fn session_layer(config: &Config) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.app_url.starts_with("https://"))
        .with_expiry(Expiry::OnInactivity(SessionDuration::days(
            SESSION_INACTIVITY_DAYS,
        )))
}

/// Allows credentialed requests from the dashboard origin only.
pub fn cors_layer(config: &Config) -> Result<CorsLayer, AppError> {
    let origin = HeaderValue::from_str(config.app_url.trim_end_matches('/')).map_err(|_| {
        ConfigError::InvalidEnvVar {
            name: "APP_URL".to_string(),
            value: config.app_url.clone(),
        }
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE]))
}

/// HTTP client for OAuth token exchange and Discord user lookups.
///
/// Redirects are never followed so a crafted response cannot bounce requests to
/// internal addresses.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(HTTP_TIMEOUT)
        .build()?;

    Ok(client)
}

/// Builds the Discord OAuth2 client from configuration.
///
/// # Returns
/// - `Ok(OAuth2Client)` - Client with authorization, token and redirect URLs set
/// - `Err(AppError::ConfigErr(InvalidUrl))` - One of the URLs does not parse
pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let client = BasicClient::new(ClientId::new(config.discord_client_id.clone()))
        .set_client_secret(ClientSecret::new(config.discord_client_secret.clone()))
        .set_auth_uri(
            AuthUrl::new(config.discord_auth_url.clone())
                .map_err(invalid_url(&config.discord_auth_url))?,
        )
        .set_token_uri(
            TokenUrl::new(config.discord_token_url.clone())
                .map_err(invalid_url(&config.discord_token_url))?,
        )
        .set_redirect_uri(
            RedirectUrl::new(config.discord_redirect_url.clone())
                .map_err(invalid_url(&config.discord_redirect_url))?,
        );

    Ok(client)
}

fn invalid_url(url: &str) -> impl FnOnce(url::ParseError) -> ConfigError {
    let url = url.to_string();
    move |source| ConfigError::InvalidUrl { url, source }
}
