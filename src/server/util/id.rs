use chrono::{DateTime, Utc};

const BASE36_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Encodes a number in upper-case base 36.
fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();

    String::from_utf8_lossy(&digits).into_owned()
}

/// Generates a human readable leave record id from the creation time.
///
/// The id is `LOA-` followed by the creation time in milliseconds, base 36. If the
/// candidate is already taken, the millisecond value is bumped until it is free.
///
/// # Arguments
/// - `now` - Creation time of the record
/// - `taken` - Returns true if an id is already in use
pub fn leave_id(now: DateTime<Utc>, taken: impl Fn(&str) -> bool) -> String {
    let mut millis = now.timestamp_millis().max(0) as u64;

    loop {
        let candidate = format!("LOA-{}", to_base36(millis));
        if !taken(&candidate) {
            return candidate;
        }
        millis += 1;
    }
}

/// Generates a notification envelope id: creation millis plus a random suffix.
pub fn envelope_id(now: DateTime<Utc>) -> String {
    format!("{}-{:08x}", now.timestamp_millis(), rand::random::<u32>())
}
