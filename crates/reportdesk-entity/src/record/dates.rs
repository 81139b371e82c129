//! Calendar date parsing and the frozen duration string.

use chrono::{DateTime, NaiveDate};

/// Parse an ISO calendar date.
///
/// Accepts `YYYY-MM-DD` and full RFC 3339 date-times (only the date part is
/// kept). Anything else yields `None`.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Build the `"dd/mm/yyyy to dd/mm/yyyy"` display string for a period.
///
/// Computed once when a record is created and stored as-is afterwards.
pub fn format_duration(start: &str, end: &str) -> Option<String> {
    let start = parse_calendar_date(start)?;
    let end = parse_calendar_date(end)?;
    Some(format!(
        "{} to {}",
        start.format("%d/%m/%Y"),
        end.format("%d/%m/%Y")
    ))
}
