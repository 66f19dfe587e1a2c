//! Interaction routing for slash commands, announcement buttons and the change request modal.
//!
//! Every interaction is resolved into an [`Actor`] from the invoking member, acknowledged
//! ephemerally and handed to the leave service. Replies are short ephemeral texts; failures
//! are reported with [`AppError::user_message`] so no internal detail reaches the chat.

use chrono::Utc;
use serenity::all::{
    ActionRow, ActionRowComponent, CommandInteraction, ComponentInteraction, Context,
    EditInteractionResponse, Interaction, Member, ModalInteraction, User,
};

use crate::server::{
    bot::{
        command::{staff_loa, staff_return, staff_role, CommandArgs},
        component::{change_request_modal, parse_custom_id, LeaveComponent, COMMENT_INPUT_ID},
        handler::Handler,
    },
    error::AppError,
    model::{actor::Actor, leave::DecisionOutcome},
    service::leave::LeaveService,
};

/// Dispatches one interaction.
pub async fn handle_interaction(handler: &Handler, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => handle_command(handler, &ctx, &command).await,
        Interaction::Component(component) => handle_component(handler, &ctx, &component).await,
        Interaction::Modal(modal) => handle_modal(handler, &ctx, &modal).await,
        _ => {}
    }
}

/// Resolves the acting member.
///
/// Interactions outside the guild carry no member and therefore no roles.
pub fn actor_of(user: &User, member: Option<&Member>) -> Actor {
    match member {
        Some(member) => Actor::chat(
            user.id.get(),
            member.display_name(),
            member.roles.iter().map(|role_id| role_id.get()).collect(),
        ),
        None => Actor::chat(user.id.get(), user.display_name(), Vec::new()),
    }
}

/// Whether the invoking member holds the administrator permission in the guild.
fn is_administrator(member: Option<&Member>) -> bool {
    member
        .and_then(|member| member.permissions)
        .is_some_and(|permissions| permissions.administrator())
}

/// Builds a leave service over the current role configuration.
async fn leave_service(handler: &Handler) -> Result<LeaveService<'_>, AppError> {
    let config = handler.role_config.get().await?;

    Ok(LeaveService::new(
        &handler.store,
        &handler.queue,
        Some(handler.platform.clone()),
        config,
    ))
}

/// Turns an operation result into reply text, logging failures.
fn reply_text(result: Result<String, AppError>, what: &str, user_id: u64) -> String {
    match result {
        Ok(text) => text,
        Err(err @ AppError::LeaveErr(_)) => {
            tracing::debug!("{} by user {} rejected: {}", what, user_id, err);
            format!("❌ {}", err.user_message())
        }
        Err(err) => {
            tracing::error!("{} by user {} failed: {}", what, user_id, err);
            format!("❌ {}", err.user_message())
        }
    }
}

async fn handle_command(handler: &Handler, ctx: &Context, command: &CommandInteraction) {
    handler.stats.record_command();

    if let Err(e) = command.defer_ephemeral(&ctx.http).await {
        tracing::warn!("Failed to acknowledge /{}: {}", command.data.name, e);
        return;
    }

    let actor = actor_of(&command.user, command.member.as_deref());
    let args = CommandArgs::from_resolved(&command.data.options());

    let result = match command.data.name.as_str() {
        staff_role::NAME => {
            let is_administrator = is_administrator(command.member.as_deref());
            staff_role::run(&handler.role_config, is_administrator, &args).await
        }
        name => match leave_service(handler).await {
            Ok(service) => match name {
                staff_loa::NAME => staff_loa::run(&service, &actor, &args).await,
                staff_return::NAME => staff_return::run(&service, &actor, &args).await,
                other => Err(AppError::BadRequest(format!("Unknown command {}", other))),
            },
            Err(e) => Err(e),
        },
    };

    let what = format!("/{}", command.data.name);
    let text = reply_text(result, &what, actor.user_id);

    if let Err(e) = command
        .edit_response(&ctx.http, EditInteractionResponse::new().content(text))
        .await
    {
        tracing::warn!("Failed to reply to {}: {}", what, e);
    }
}

async fn handle_component(handler: &Handler, ctx: &Context, interaction: &ComponentInteraction) {
    let Some(component) = parse_custom_id(&interaction.data.custom_id) else {
        tracing::debug!(
            "Ignoring component {} not owned by the leave workflow",
            interaction.data.custom_id
        );
        return;
    };

    handler.stats.record_command();

    let outcome = match component {
        LeaveComponent::Modify(leave_id) => {
            if let Err(e) = interaction
                .create_response(&ctx.http, change_request_modal(&leave_id))
                .await
            {
                tracing::warn!("Failed to open change request modal for {}: {}", leave_id, e);
            }
            return;
        }
        LeaveComponent::Approve(leave_id) => (leave_id, DecisionOutcome::Approve),
        LeaveComponent::Deny(leave_id) => (leave_id, DecisionOutcome::Deny),
        LeaveComponent::ModifyModal(_) => return,
    };

    if let Err(e) = interaction.defer_ephemeral(&ctx.http).await {
        tracing::warn!("Failed to acknowledge decision on {}: {}", outcome.0, e);
        return;
    }

    let actor = actor_of(&interaction.user, interaction.member.as_ref());
    let (leave_id, decision) = outcome;

    let result = match leave_service(handler).await {
        Ok(service) => service
            .decide(&actor, &leave_id, decision, Utc::now())
            .await
            .map(|record| match decision {
                DecisionOutcome::Approve => format!(
                    "✅ Leave of absence **{}** of <@{}> approved.",
                    record.id, record.user_id
                ),
                DecisionOutcome::Deny => format!(
                    "❌ Leave of absence **{}** of <@{}> denied.",
                    record.id, record.user_id
                ),
            }),
        Err(e) => Err(e),
    };

    let text = reply_text(result, &format!("Decision on {}", leave_id), actor.user_id);

    if let Err(e) = interaction
        .edit_response(&ctx.http, EditInteractionResponse::new().content(text))
        .await
    {
        tracing::warn!("Failed to reply to decision on {}: {}", leave_id, e);
    }
}

async fn handle_modal(handler: &Handler, ctx: &Context, modal: &ModalInteraction) {
    let Some(LeaveComponent::ModifyModal(leave_id)) = parse_custom_id(&modal.data.custom_id) else {
        return;
    };

    handler.stats.record_command();

    if let Err(e) = modal.defer_ephemeral(&ctx.http).await {
        tracing::warn!("Failed to acknowledge change request on {}: {}", leave_id, e);
        return;
    }

    let actor = actor_of(&modal.user, modal.member.as_ref());
    let comment = modal_comment(&modal.data.components).unwrap_or_default();

    let result = match leave_service(handler).await {
        Ok(service) => service
            .request_changes(&actor, &leave_id, &comment, Utc::now())
            .await
            .map(|record| {
                format!(
                    "📝 Change request sent to <@{}> for **{}**.",
                    record.user_id, record.id
                )
            }),
        Err(e) => Err(e),
    };

    let text = reply_text(result, &format!("Change request on {}", leave_id), actor.user_id);

    if let Err(e) = modal
        .edit_response(&ctx.http, EditInteractionResponse::new().content(text))
        .await
    {
        tracing::warn!("Failed to reply to change request on {}: {}", leave_id, e);
    }
}

/// Extracts the comment typed into the change request modal.
fn modal_comment(rows: &[ActionRow]) -> Option<String> {
    rows.iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == COMMENT_INPUT_ID => {
                input.value.clone()
            }
            _ => None,
        })
}
