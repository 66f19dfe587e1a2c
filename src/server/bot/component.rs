//! Custom IDs of the buttons and modal attached to leave announcements.
//!
//! Discord echoes a component's custom ID back on every click, so the leave record a
//! button acts on is encoded in the ID itself.

use serenity::all::{
    CreateActionRow, CreateInputText, CreateInteractionResponse, CreateModal, InputTextStyle,
};

const APPROVE_PREFIX: &str = "approve_loa_";
const DENY_PREFIX: &str = "deny_loa_";
const MODIFY_PREFIX: &str = "modify_loa_";
const MODIFY_MODAL_PREFIX: &str = "modify_loa_modal_";

/// Custom ID of the comment field inside the change request modal.
pub const COMMENT_INPUT_ID: &str = "comment";

/// A leave announcement component, carrying the ID of the record it acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveComponent {
    Approve(String),
    Deny(String),
    /// Opens the change request modal.
    Modify(String),
    /// Submission of the change request modal.
    ModifyModal(String),
}

impl LeaveComponent {
    pub fn custom_id(&self) -> String {
        match self {
            Self::Approve(id) => format!("{}{}", APPROVE_PREFIX, id),
            Self::Deny(id) => format!("{}{}", DENY_PREFIX, id),
            Self::Modify(id) => format!("{}{}", MODIFY_PREFIX, id),
            Self::ModifyModal(id) => format!("{}{}", MODIFY_MODAL_PREFIX, id),
        }
    }

    pub fn leave_id(&self) -> &str {
        match self {
            Self::Approve(id) | Self::Deny(id) | Self::Modify(id) | Self::ModifyModal(id) => id,
        }
    }
}

/// Parses a component custom ID.
///
/// The modal prefix shares its start with the modify button prefix, so it is matched
/// first.
///
/// # Returns
/// - `Some(LeaveComponent)` - A leave component with a non-empty record ID
/// - `None` - The ID belongs to something else
pub fn parse_custom_id(custom_id: &str) -> Option<LeaveComponent> {
    let prefixes: [(&str, fn(String) -> LeaveComponent); 4] = [
        (MODIFY_MODAL_PREFIX, LeaveComponent::ModifyModal),
        (APPROVE_PREFIX, LeaveComponent::Approve),
        (DENY_PREFIX, LeaveComponent::Deny),
        (MODIFY_PREFIX, LeaveComponent::Modify),
    ];

    prefixes.into_iter().find_map(|(prefix, build)| {
        custom_id
            .strip_prefix(prefix)
            .filter(|id| !id.is_empty())
            .map(|id| build(id.to_string()))
    })
}

/// The modal asking an approver what should change.
pub fn change_request_modal(leave_id: &str) -> CreateInteractionResponse {
    let input = CreateInputText::new(InputTextStyle::Paragraph, "Requested changes", COMMENT_INPUT_ID)
        .placeholder("Describe what the requester should change")
        .max_length(1000)
        .required(true);

    CreateInteractionResponse::Modal(
        CreateModal::new(
            LeaveComponent::ModifyModal(leave_id.to_string()).custom_id(),
            format!("Request changes to {}", leave_id),
        )
        .components(vec![CreateActionRow::InputText(input)]),
    )
}
