use chrono::NaiveDate;

use crate::server::error::{internal::InternalError, leave::LeaveError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId {
            value: value,
            source: e,
        })?;

    Ok(result)
}

/// Parses a Discord snowflake supplied by a user (path segment, form field).
///
/// Surrounding whitespace is ignored. Zero is rejected because the Discord client types
/// cannot represent it.
///
/// # Returns
/// - `Ok(u64)` - A non-zero ID
/// - `Err(AppError::BadRequest)` - Empty, non-numeric or zero
pub fn parse_discord_id(value: &str) -> Result<u64, AppError> {
    match value.trim().parse::<u64>() {
        Ok(id) if id != 0 => Ok(id),
        _ => Err(AppError::BadRequest(format!(
            "'{}' is not a valid Discord ID",
            value.trim()
        ))),
    }
}

/// Parses a calendar date in `YYYY-MM-DD` form.
///
/// # Arguments
/// - `value` - Raw user input
/// - `field` - Human readable field name used in the error message
///
/// # Returns
/// - `Ok(NaiveDate)` - The parsed date
/// - `Err(LeaveError::Validation)` - Input is not a real date in the expected format
pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, LeaveError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        LeaveError::Validation(format!(
            "Invalid {} '{}'. Please use the YYYY-MM-DD format.",
            field,
            value.trim()
        ))
    })
}
