use std::path::PathBuf;

use crate::server::{
    error::{config::ConfigError, AppError},
    model::role_config::RoleConfig,
};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_APP_URL: &str = "http://localhost:3000";

pub struct Config {
    pub data_dir: PathBuf,
    pub bind_addr: String,
    pub app_url: String,

    pub run_bot: bool,
    pub run_dashboard: bool,

    pub discord_bot_token: Option<String>,
    pub discord_guild_id: Option<u64>,

    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_redirect_url: String,

    pub discord_auth_url: String,
    pub discord_token_url: String,

    /// Written to the role configuration file when the data directory has none yet.
    pub role_config_seed: RoleConfig,
    /// Users given the super admin dashboard role on startup.
    pub super_admin_ids: Vec<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let require = |name: &str| {
            get(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let run_bot = parse_bool("RUN_BOT", get("RUN_BOT"))?;
        let run_dashboard = parse_bool("RUN_DASHBOARD", get("RUN_DASHBOARD"))?;

        let discord_bot_token = if run_bot {
            Some(require("DISCORD_BOT_TOKEN")?)
        } else {
            get("DISCORD_BOT_TOKEN")
        };
        let discord_guild_id = match (run_bot, get("DISCORD_GUILD_ID")) {
            (_, Some(value)) => Some(parse_id("DISCORD_GUILD_ID", &value)?),
            (true, None) => {
                return Err(ConfigError::MissingEnvVar("DISCORD_GUILD_ID".to_string()).into())
            }
            (false, None) => None,
        };

        let (discord_client_id, discord_client_secret, discord_redirect_url) = if run_dashboard {
            (
                require("DISCORD_CLIENT_ID")?,
                require("DISCORD_CLIENT_SECRET")?,
                require("DISCORD_REDIRECT_URL")?,
            )
        } else {
            (String::new(), String::new(), String::new())
        };

        let role_config_seed = RoleConfig {
            staff_role_id: parse_optional_id("STAFF_ROLE_ID", get("STAFF_ROLE_ID"))?,
            leave_role_id: parse_optional_id("LOA_ROLE_ID", get("LOA_ROLE_ID"))?,
            leave_channel_id: parse_optional_id("LOA_CHANNEL_ID", get("LOA_CHANNEL_ID"))?,
            staff_channel_id: parse_optional_id("STAFF_CHANNEL_ID", get("STAFF_CHANNEL_ID"))?,
            approver_role_ids: parse_id_list(
                "LOA_APPROVER_ROLE_IDS",
                get("LOA_APPROVER_ROLE_IDS"),
            )?,
            ping_role_ids: parse_id_list("LOA_PING_ROLE_IDS", get("LOA_PING_ROLE_IDS"))?,
            admin_user_ids: parse_id_list("LOA_ADMIN_USER_IDS", get("LOA_ADMIN_USER_IDS"))?,
        };

        Ok(Self {
            data_dir: PathBuf::from(get("DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            app_url: get("APP_URL").unwrap_or_else(|| DEFAULT_APP_URL.to_string()),
            run_bot,
            run_dashboard,
            discord_bot_token,
            discord_guild_id,
            discord_client_id,
            discord_client_secret,
            discord_redirect_url,
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            role_config_seed,
            super_admin_ids: parse_id_list("SUPER_ADMIN_IDS", get("SUPER_ADMIN_IDS"))?,
        })
    }
}

fn invalid(name: &str, value: &str) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
    }
}

/// Unset means enabled.
fn parse_bool(name: &str, value: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(true);
    };

    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid(name, &value)),
    }
}

/// Discord snowflakes are never zero.
fn parse_id(name: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| invalid(name, value))
}

fn parse_optional_id(name: &str, value: Option<String>) -> Result<Option<u64>, ConfigError> {
    value.map(|value| parse_id(name, &value)).transpose()
}

/// Comma separated IDs; empty entries are skipped.
fn parse_id_list(name: &str, value: Option<String>) -> Result<Vec<u64>, ConfigError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };

    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| parse_id(name, entry))
        .collect()
}
