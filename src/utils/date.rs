//! Display formatting for version timestamps carried in payloads

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse the timestamp shapes the backend is known to send
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.naive_local());
    }
    const FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
    for format in FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Format a timestamp as `19 Oct 2026 11:51 am`
///
/// Unparseable input is returned unchanged.
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(timestamp) => timestamp.format("%d %b %Y %I:%M %P").to_string(),
        None => raw.to_string(),
    }
}

/// Format a timestamp as a day label, `19-Oct-2026`
pub fn format_day(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(timestamp) => timestamp.format("%d-%b-%Y").to_string(),
        None => raw.to_string(),
    }
}
