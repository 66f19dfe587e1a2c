use chrono::{Days, NaiveDate, Utc};

/// Current UTC calendar date.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// UTC calendar date offset from today; negative offsets go into the past.
pub fn days_from_today(offset: i64) -> NaiveDate {
    let today = today();
    let days = Days::new(offset.unsigned_abs());

    if offset >= 0 {
        today.checked_add_days(days).unwrap()
    } else {
        today.checked_sub_days(days).unwrap()
    }
}

/// Builds a date from its components.
pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
