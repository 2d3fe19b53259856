//! Utility functions shared by the renderers.
//!
//! HTML escaping plus the small formatting helpers used in list rows:
//! durations, relative dates and file sizes.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// File size units, in steps of 1024.
const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Escapes text for safe insertion into HTML content or attribute values.
///
/// Filenames and tag metadata come straight from the server's filesystem,
/// so every piece of it goes through here before reaching markup.
///
/// # Arguments
///
/// * `text` - Untrusted text.
///
/// # Returns
///
/// The text with `& < > " '` replaced by entities.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Formats a duration in seconds as `m:ss`.
///
/// Missing, zero or non-finite durations render as `--:--`.
#[must_use]
pub fn format_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(seconds) if seconds.is_finite() && seconds > 0.0 => {
            let whole = seconds.floor() as u64;
            format!("{}:{:02}", whole / 60, whole % 60)
        }
        _ => "--:--".to_string(),
    }
}

/// Parses a server timestamp into local naive time.
///
/// Accepts RFC 3339, ISO date-times with or without fractional seconds
/// (the server emits local time without an offset) and plain dates.
#[must_use]
pub fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    let timestamp = timestamp.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(parsed.with_timezone(&Local).naive_local());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(timestamp, format) {
            return Some(parsed);
        }
    }

    NaiveDate::parse_from_str(timestamp, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Formats a timestamp relative to `now`.
///
/// Same day gives "Today", one day "Yesterday", under a week "N days ago",
/// anything older the `YYYY-MM-DD` date. Future timestamps count as today.
/// Missing or unparseable timestamps give an empty string.
///
/// # Arguments
///
/// * `timestamp` - Server timestamp.
/// * `now` - Current local time.
#[must_use]
pub fn format_date(timestamp: Option<&str>, now: NaiveDateTime) -> String {
    let Some(date) = timestamp.and_then(parse_timestamp) else {
        return String::new();
    };

    let days = (now - date).num_seconds().div_euclid(86_400).max(0);
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        _ => date.format("%Y-%m-%d").to_string(),
    }
}

/// Formats a byte count with one decimal, e.g. `1.5 KB`.
///
/// Trailing `.0` is dropped. Anything past gigabytes stays in GB.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, SIZE_UNITS[unit])
    } else {
        format!("{rounded:.1} {}", SIZE_UNITS[unit])
    }
}

/// First `max_chars` characters of the lyrics followed by `...`.
#[must_use]
pub fn lyrics_preview(lyrics: &str, max_chars: usize) -> String {
    let mut preview: String = lyrics.chars().take(max_chars).collect();
    preview.push_str("...");
    preview
}
