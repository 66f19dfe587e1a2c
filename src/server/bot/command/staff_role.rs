//! `/staff-role`, the chat-side editor of the role configuration.

use serenity::all::{ChannelType, CommandOptionType, CreateCommand, CreateCommandOption, Permissions};

use crate::server::{
    bot::command::CommandArgs,
    error::{leave::LeaveError, AppError},
    model::role_config::RoleConfig,
    service::role_config::RoleConfigService,
};

pub const NAME: &str = "staff-role";

pub fn definition() -> CreateCommand {
    let role_option = |description: &str| {
        CreateCommandOption::new(CommandOptionType::Role, "role", description).required(true)
    };

    CreateCommand::new(NAME)
        .description("Configure roles for the Staff LOA system")
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "staff",
                "Set the staff role required for staff-loa and staff-return commands",
            )
            .add_sub_option(role_option("The staff role")),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "loa",
                "Set the role assigned during Leave of Absence",
            )
            .add_sub_option(role_option("The LOA role")),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "channel",
                "Set the channel for LOA announcements",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "channel",
                    "The channel where LOA requests will be posted",
                )
                .channel_types(vec![ChannelType::Text])
                .required(true),
            ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "show",
            "Show the current role settings",
        ))
}

/// Applies one subcommand.
///
/// # Arguments
/// - `roles` - Role configuration service shared with the leave commands
/// - `is_administrator` - Whether the invoking member holds the administrator permission
/// - `args` - Parsed options
///
/// # Returns
/// - `Ok(String)` - Reply describing the new or current settings
/// - `Err(AppError::LeaveErr(Unauthorized))` - The member is not an administrator
/// - `Err(AppError::LeaveErr(Validation))` - Unknown subcommand or missing option
/// - `Err(AppError::StoreErr)` - The configuration file could not be written
pub async fn run(
    roles: &RoleConfigService,
    is_administrator: bool,
    args: &CommandArgs,
) -> Result<String, AppError> {
    if !is_administrator {
        return Err(LeaveError::Unauthorized.into());
    }

    let required_id = |name: &str| {
        args.id(name)
            .ok_or_else(|| LeaveError::Validation(format!("Missing option '{}'.", name)))
    };

    match args.subcommand.as_deref() {
        Some("staff") => {
            let role_id = required_id("role")?;
            roles.update(|config| config.staff_role_id = Some(role_id)).await?;
            Ok(format!("✅ The staff role has been set to <@&{}>.", role_id))
        }
        Some("loa") => {
            let role_id = required_id("role")?;
            roles.update(|config| config.leave_role_id = Some(role_id)).await?;
            Ok(format!("✅ The LOA role has been set to <@&{}>.", role_id))
        }
        Some("channel") => {
            let channel_id = required_id("channel")?;
            roles
                .update(|config| config.leave_channel_id = Some(channel_id))
                .await?;
            Ok(format!("✅ The LOA channel has been set to <#{}>.", channel_id))
        }
        Some("show") => Ok(settings(&roles.get().await?)),
        other => Err(LeaveError::Validation(format!(
            "Unknown subcommand '{}'.",
            other.unwrap_or_default()
        ))
        .into()),
    }
}

fn settings(config: &RoleConfig) -> String {
    let role = |id: Option<u64>| {
        id.map(|id| format!("<@&{}>", id))
            .unwrap_or_else(|| "Not configured".to_string())
    };
    let channel = |id: Option<u64>| {
        id.map(|id| format!("<#{}>", id))
            .unwrap_or_else(|| "Not configured".to_string())
    };

    format!(
        "🔧 **Staff System Settings**\n\
         Staff Role: {}\n\
         LOA Role: {}\n\
         LOA Channel: {}\n\
         Use /staff-role staff, /staff-role loa or /staff-role channel to change these settings.",
        role(config.staff_role_id),
        role(config.leave_role_id),
        channel(config.leave_channel_id),
    )
}
