//! Builders for the announcements and direct messages of the leave workflow.
//!
//! Everything here is pure: a record goes in, a platform-neutral [`Notice`] comes out.

use chrono::NaiveDate;

use crate::server::{
    model::{
        leave::{LeaveCategory, LeaveRecord, LeaveStatus},
        role_config::RoleConfig,
    },
    platform::Notice,
};

pub const PENDING_COLOUR: u32 = 0xf1c40f;
pub const APPROVED_COLOUR: u32 = 0x2ecc71;
pub const DENIED_COLOUR: u32 = 0xe74c3c;
pub const CHANGES_COLOUR: u32 = 0xe67e22;
pub const EXTENSION_COLOUR: u32 = 0x3498db;
pub const RETURNED_COLOUR: u32 = 0x9b59b6;
pub const EXPIRED_COLOUR: u32 = 0x95a5a6;

const FOOTER: &str = "Staff LOA System • Use /staff-return when you come back";

/// Formats a date the way announcements show it, e.g. `Jan 5, 2025`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn icon(category: LeaveCategory) -> &'static str {
    match category {
        LeaveCategory::Vacation => "🏖️",
        LeaveCategory::Personal => "🏠",
        LeaveCategory::Medical => "🏥",
        LeaveCategory::SchoolWork => "📚",
        LeaveCategory::Other => "❓",
    }
}

/// Rough size class of a leave by its length in days.
pub fn duration_label(days: i64) -> &'static str {
    if days <= 3 {
        "Short Leave"
    } else if days <= 14 {
        "Extended Leave"
    } else {
        "Long-Term Absence"
    }
}

fn plural_days(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

fn status_text(record: &LeaveRecord) -> String {
    match &record.status {
        LeaveStatus::Pending => format!("⏳ Pending • {}", duration_label(record.duration_days())),
        LeaveStatus::Approved(decision) => format!("✅ Approved by {}", decision.by_name),
        LeaveStatus::Denied(decision) => format!("❌ Denied by {}", decision.by_name),
        LeaveStatus::Removed { .. } => "Closed".to_string(),
    }
}

fn status_colour(status: &LeaveStatus) -> u32 {
    match status {
        LeaveStatus::Pending => PENDING_COLOUR,
        LeaveStatus::Approved(_) => APPROVED_COLOUR,
        LeaveStatus::Denied(_) => DENIED_COLOUR,
        LeaveStatus::Removed { .. } => EXPIRED_COLOUR,
    }
}

/// Embed with the standard record fields.
fn record_notice(record: &LeaveRecord, title: String, colour: u32) -> Notice {
    Notice::new(title, "", colour)
        .field("Staff Member", format!("<@{}>", record.user_id), true)
        .field("Status", status_text(record), true)
        .field("ID", record.id.clone(), true)
        .field("Start Date", format_date(record.start_date), true)
        .field("End Date", format_date(record.end_date), true)
        .field("Duration", plural_days(record.duration_days()), true)
        .field(
            format!("Reason ({})", record.category.label()),
            record.reason.clone(),
            false,
        )
        .footer(FOOTER)
}

fn title(record: &LeaveRecord) -> String {
    format!(
        "Staff Leave of Absence - {} {}",
        icon(record.category),
        record.category.label()
    )
}

/// Public announcement of a new request, with decision buttons and role pings.
pub fn announcement(record: &LeaveRecord, config: &RoleConfig) -> Notice {
    let mut content = format!(
        "<@{}> has submitted a leave of absence request.",
        record.user_id
    );
    for role_id in &config.ping_role_ids {
        content.push_str(&format!(" <@&{}>", role_id));
    }

    record_notice(record, title(record), status_colour(&record.status))
        .content(content)
        .with_decision_buttons(record.id.clone())
}

/// The announcement after a decision: new status and colour, buttons removed.
pub fn decided(record: &LeaveRecord) -> Notice {
    let mut notice = record_notice(record, title(record), status_colour(&record.status));

    if let Some(decision) = record.status.decision() {
        notice = notice.field(
            "Decided",
            format!("{} by {}", decision.at.format("%Y-%m-%d %H:%M UTC"), decision.by_name),
            false,
        );
    }

    notice
}

/// The announcement after an approver asked for changes; still awaiting a decision.
pub fn changes_requested(record: &LeaveRecord, comment: &str, by_name: &str) -> Notice {
    let mut notice = record_notice(record, title(record), CHANGES_COLOUR)
        .field(format!("Changes requested by {}", by_name), comment, false);

    if matches!(record.status, LeaveStatus::Pending) {
        notice = notice.with_decision_buttons(record.id.clone());
    }

    notice
}

/// Notice of an extended leave, posted publicly and sent to an administrator.
pub fn extension(record: &LeaveRecord, previous_end: NaiveDate, reason: &str) -> Notice {
    let reason = if reason.trim().is_empty() {
        "No reason given"
    } else {
        reason
    };

    Notice::new(
        format!(
            "LOA Extended - {} {}",
            icon(record.category),
            record.category.label()
        ),
        "",
        EXTENSION_COLOUR,
    )
    .content(format!(
        "📝 <@{}> has extended their Leave of Absence (ID: {})",
        record.user_id, record.id
    ))
    .field("Staff Member", format!("<@{}>", record.user_id), true)
    .field("Status", status_text(record), true)
    .field("ID", record.id.clone(), true)
    .field("Original End Date", format_date(previous_end), true)
    .field("New End Date", format_date(record.end_date), true)
    .field("Updated Duration", plural_days(record.duration_days()), true)
    .field("Extension Reason", reason, false)
    .footer(FOOTER)
}

/// Announcement that a staff member is back.
pub fn returned(
    user_id: u64,
    username: &str,
    record: Option<&LeaveRecord>,
    comment: Option<&str>,
) -> Notice {
    let mut notice = Notice::new(
        "Staff Member Returned",
        format!("<@{}> is back from their leave of absence.", user_id),
        RETURNED_COLOUR,
    )
    .content(format!("👋 Welcome back, {}!", username));

    if let Some(record) = record {
        notice = notice
            .field("ID", record.id.clone(), true)
            .field("Planned End Date", format_date(record.end_date), true);
    }

    if let Some(comment) = comment.filter(|c| !c.trim().is_empty()) {
        notice = notice.field("Comment", comment, false);
    }

    notice
}

/// Direct message confirming a submission to the requester.
pub fn receipt(record: &LeaveRecord) -> Notice {
    let description = if record.is_private {
        "Your leave of absence request has been submitted. It is marked as private and awaiting approval."
    } else {
        "Your leave of absence request has been submitted and posted for approval."
    };

    Notice {
        description: description.to_string(),
        ..record_notice(record, "LOA Request Submitted".to_string(), PENDING_COLOUR)
    }
}

/// Direct message asking an administrator to review a new request.
pub fn admin_request(record: &LeaveRecord) -> Notice {
    let mut notice = record_notice(record, title(record), PENDING_COLOUR).content(format!(
        "New LOA request from {} needs approval. ID: {}",
        record.username, record.id
    ));

    if record.is_private {
        notice = notice.field("Visibility", "🔒 Private, only visible to admins", false);
    }

    notice
}

/// Direct message telling the requester about a decision.
pub fn decision_dm(record: &LeaveRecord) -> Notice {
    let (title, description) = match &record.status {
        LeaveStatus::Approved(decision) => (
            "Leave of Absence Approved",
            format!(
                "Your leave of absence {} was approved by {}.",
                record.id, decision.by_name
            ),
        ),
        LeaveStatus::Denied(decision) => (
            "Leave of Absence Denied",
            format!(
                "Your leave of absence {} was denied by {}.",
                record.id, decision.by_name
            ),
        ),
        _ => (
            "Leave of Absence Updated",
            format!("Your leave of absence {} was updated.", record.id),
        ),
    };

    Notice {
        description,
        ..record_notice(record, title.to_string(), status_colour(&record.status))
    }
}

/// Direct message passing an approver's change request on to the requester.
pub fn changes_dm(record: &LeaveRecord, comment: &str, by_name: &str) -> Notice {
    Notice::new(
        "Changes Requested",
        format!(
            "{} requested changes to your leave of absence {}.",
            by_name, record.id
        ),
        CHANGES_COLOUR,
    )
    .field("Comment", comment, false)
}

/// Direct message sent once when a leave has ended.
pub fn expired_dm(record: &LeaveRecord) -> Notice {
    Notice::new(
        "Leave of Absence Ended",
        format!(
            "Your leave of absence {} ended on {}. Welcome back!",
            record.id,
            format_date(record.end_date)
        ),
        EXPIRED_COLOUR,
    )
}

/// Direct message telling the requester their record was deleted.
pub fn deleted_dm(record: &LeaveRecord, by_name: &str) -> Notice {
    Notice::new(
        "Leave of Absence Removed",
        format!(
            "Your leave of absence {} ({} to {}) was removed by {}.",
            record.id,
            format_date(record.start_date),
            format_date(record.end_date),
            by_name
        ),
        EXPIRED_COLOUR,
    )
}
