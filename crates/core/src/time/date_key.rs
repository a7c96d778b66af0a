use chrono::{Duration, NaiveDate};

/// Layout of every date key in state and payloads. Keys in this layout sort
/// lexically in chronological order.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Strict: exactly `YYYY-MM-DD`, zero padded, no surrounding whitespace.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    let bytes = key.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}

pub fn format_date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Shifts a date key by `days` calendar days. `None` if the key does not parse.
pub fn shift_date_key(key: &str, days: i64) -> Option<String> {
    let date = parse_date_key(key)?;
    let shifted = date.checked_add_signed(Duration::days(days))?;
    Some(format_date_key(shifted))
}
