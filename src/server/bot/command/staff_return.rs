//! `/staff-return`.

use chrono::Utc;
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};

use crate::server::{
    bot::command::CommandArgs,
    error::AppError,
    model::actor::Actor,
    service::leave::{early_return::EarlyReturnOutcome, LeaveService},
};

pub const NAME: &str = "staff-return";

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Return from Leave of Absence early")
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "comment",
            "Optional comment about your early return",
        ))
}

pub async fn run(
    service: &LeaveService<'_>,
    actor: &Actor,
    args: &CommandArgs,
) -> Result<String, AppError> {
    let outcome = service
        .early_return(actor, args.string("comment"), Utc::now())
        .await?;

    Ok(reply(&outcome))
}

fn reply(outcome: &EarlyReturnOutcome) -> String {
    match outcome {
        EarlyReturnOutcome::Returned { record: Some(record) } => format!(
            "👋 Welcome back! Your leave of absence **{}** has been ended early.",
            record.id
        ),
        EarlyReturnOutcome::Returned { record: None } => {
            "👋 Welcome back! Your leave role has been removed.".to_string()
        }
        EarlyReturnOutcome::NothingToReturnFrom => {
            "You don't have an active leave of absence to return from.".to_string()
        }
    }
}
