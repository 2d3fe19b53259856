//! Capture-date parsing for pictures.
//!
//! Pictures carry their capture date in whatever form the metadata had:
//! IPTC `YYYYMMDD`, EXIF `YYYY:MM:DD HH:MM:SS`, or something ISO-like.
//! Strategies run in that order and the first valid date wins.

use std::sync::LazyLock;

use {
    chrono::{DateTime, NaiveDate, NaiveDateTime},
    regex::Regex,
};

/// Shown when no strategy yields a valid date.
pub const UNKNOWN_DATE: &str = "Unknown date";

static COMPACT_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})$").expect("valid IPTC date pattern"));

static EXIF_DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}):(\d{2}):(\d{2})").expect("valid EXIF date pattern"));

/// Parses a capture date.
///
/// # Arguments
///
/// * `raw` - The `date_taken` string from the server.
///
/// # Returns
///
/// The calendar date, or `None` if no strategy produced a valid one.
#[must_use]
pub fn parse_date_taken(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    parse_compact(raw)
        .or_else(|| parse_exif(raw))
        .or_else(|| parse_generic(raw))
}

/// Human-readable capture date, `YYYY-MM-DD` or "Unknown date".
#[must_use]
pub fn describe_date_taken(raw: Option<&str>) -> String {
    raw.and_then(parse_date_taken)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

/// IPTC `YYYYMMDD`.
fn parse_compact(raw: &str) -> Option<NaiveDate> {
    let captures = COMPACT_DATE.captures(raw)?;
    let year = captures[1].parse().ok()?;
    let month = captures[2].parse().ok()?;
    let day = captures[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// EXIF `YYYY:MM:DD HH:MM:SS`, normalised to ISO before parsing.
fn parse_exif(raw: &str) -> Option<NaiveDate> {
    if !raw.contains(':') {
        return None;
    }
    let normalized = EXIF_DATE_PREFIX
        .replace(raw, "${1}-${2}-${3}")
        .replacen(' ', "T", 1);
    parse_generic(&normalized)
}

/// RFC 3339, ISO date-time, ISO or slashed date, RFC 2822.
fn parse_generic(raw: &str) -> Option<NaiveDate> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.date());
        }
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(parsed) = NaiveDate::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }

    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|parsed| parsed.date_naive())
}
