//! `/staff-loa request` and `/staff-loa extend`.

use chrono::Utc;
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};

use crate::server::{
    bot::command::CommandArgs,
    error::{leave::LeaveError, AppError},
    model::{
        actor::Actor,
        leave::{ExtendLeaveParam, LeaveCategory, SubmitLeaveParam},
    },
    service::leave::{notice::format_date, LeaveService},
};

pub const NAME: &str = "staff-loa";

pub fn definition() -> CreateCommand {
    let mut category = CreateCommandOption::new(
        CommandOptionType::String,
        "type",
        "The type of absence",
    )
    .required(true);
    for choice in LeaveCategory::ALL {
        category = category.add_string_choice(choice.label(), choice.as_str());
    }

    let request = CreateCommandOption::new(
        CommandOptionType::SubCommand,
        "request",
        "Submit a new Leave of Absence request",
    )
    .add_sub_option(
        CreateCommandOption::new(
            CommandOptionType::String,
            "start-date",
            "The start date of your leave (YYYY-MM-DD)",
        )
        .required(true),
    )
    .add_sub_option(
        CreateCommandOption::new(
            CommandOptionType::String,
            "end-date",
            "The end date of your leave (YYYY-MM-DD)",
        )
        .required(true),
    )
    .add_sub_option(
        CreateCommandOption::new(
            CommandOptionType::String,
            "reason",
            "The reason for your leave of absence",
        )
        .required(true),
    )
    .add_sub_option(category)
    .add_sub_option(CreateCommandOption::new(
        CommandOptionType::Boolean,
        "private",
        "Make this request private (only visible to admins)",
    ));

    let extend = CreateCommandOption::new(
        CommandOptionType::SubCommand,
        "extend",
        "Extend your existing Leave of Absence",
    )
    .add_sub_option(
        CreateCommandOption::new(
            CommandOptionType::String,
            "loa-id",
            "The ID of your current LOA (e.g. LOA-XXXXXX)",
        )
        .required(true),
    )
    .add_sub_option(
        CreateCommandOption::new(
            CommandOptionType::String,
            "new-end-date",
            "The new end date for your leave (YYYY-MM-DD)",
        )
        .required(true),
    )
    .add_sub_option(
        CreateCommandOption::new(
            CommandOptionType::String,
            "reason",
            "The reason for extending your leave",
        )
        .required(true),
    );

    CreateCommand::new(NAME)
        .description("Staff Leave of Absence management")
        .add_option(request)
        .add_option(extend)
}

/// Builds the submission input of `/staff-loa request`.
pub fn submit_param(args: &CommandArgs) -> Result<SubmitLeaveParam, LeaveError> {
    Ok(SubmitLeaveParam {
        start_date: args.required("start-date")?.to_string(),
        end_date: args.required("end-date")?.to_string(),
        reason: args.required("reason")?.to_string(),
        category: args.required("type")?.parse()?,
        is_private: args.bool("private").unwrap_or(false),
    })
}

/// Builds the extension input of `/staff-loa extend`.
pub fn extend_param(args: &CommandArgs) -> Result<ExtendLeaveParam, LeaveError> {
    Ok(ExtendLeaveParam {
        leave_id: args.required("loa-id")?.to_string(),
        new_end_date: args.required("new-end-date")?.to_string(),
        reason: args.required("reason")?.to_string(),
    })
}

/// Runs the selected subcommand and returns the ephemeral reply.
pub async fn run(
    service: &LeaveService<'_>,
    actor: &Actor,
    args: &CommandArgs,
) -> Result<String, AppError> {
    match args.subcommand.as_deref() {
        Some("request") => {
            let record = service.submit(actor, submit_param(args)?, Utc::now()).await?;
            let visibility = if record.is_private {
                " It is private and only visible to administrators."
            } else {
                ""
            };

            Ok(format!(
                "✅ Your leave of absence request **{}** ({} to {}) has been submitted and is pending approval.{}",
                record.id,
                format_date(record.start_date),
                format_date(record.end_date),
                visibility
            ))
        }
        Some("extend") => {
            let record = service.extend(actor, extend_param(args)?, Utc::now()).await?;

            Ok(format!(
                "✅ Your leave of absence **{}** now ends on {}.",
                record.id,
                format_date(record.end_date)
            ))
        }
        other => Err(AppError::BadRequest(format!(
            "Unknown subcommand {:?}",
            other
        ))),
    }
}
