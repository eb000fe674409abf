//! Day keys and seed derivation
//!
//! A day key is the UTC calendar date as `YYYY-MM-DD`. Hashing the key with
//! 32-bit FNV-1a gives the seed for that day's challenge.

use chrono::{DateTime, Days, NaiveDate, Utc};

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// Date format used for day keys
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Day key for a calendar date
pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

/// Day key for an instant, normalised to UTC
pub fn day_key_at(instant: DateTime<Utc>) -> String {
    day_key(instant.date_naive())
}

/// FNV-1a over the key's code points, wrapping at 32 bits
pub fn seed_from_key(key: &str) -> u32 {
    key.chars().fold(FNV_OFFSET_BASIS, |hash, c| {
        (hash ^ c as u32).wrapping_mul(FNV_PRIME)
    })
}

/// Parse a day key back into a date
pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DAY_KEY_FORMAT).ok()
}

/// The key of the calendar day before `key`, or `None` if `key` is not a date
pub fn previous_day_key(key: &str) -> Option<String> {
    parse_day_key(key)?
        .checked_sub_days(Days::new(1))
        .map(day_key)
}
