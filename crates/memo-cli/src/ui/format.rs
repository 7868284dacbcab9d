//! String formatting utilities for UI rendering.

use chrono::{Local, TimeZone, Utc};
use chrono_tz::Tz;

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let kept: String = s.chars().take(max_len - 3).collect();
    format!("{}...", kept)
}

/// Sanitize a string for single-line output (replace newlines with spaces).
pub fn single_line(s: &str) -> String {
    s.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// First 8 characters of an id.
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Format a millisecond timestamp.
///
/// Pretty output uses `timezone` (an IANA name) or the local zone; plain
/// output is always RFC 3339 in UTC.
pub fn format_timestamp(millis: i64, timezone: Option<&str>, pretty: bool) -> String {
    let Some(utc) = Utc.timestamp_millis_opt(millis).single() else {
        return millis.to_string();
    };
    if !pretty {
        return utc.to_rfc3339();
    }
    match timezone.and_then(|name| name.parse::<Tz>().ok()) {
        Some(tz) => tz
            .from_utc_datetime(&utc.naive_utc())
            .format("%Y-%m-%d %H:%M %Z")
            .to_string(),
        None => utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    }
}

/// Whether `name` is a known IANA timezone.
pub fn is_valid_timezone(name: &str) -> bool {
    name.parse::<Tz>().is_ok()
}
