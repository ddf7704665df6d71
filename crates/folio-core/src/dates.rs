//! Display formatting for CMS dates.

use chrono::{DateTime, NaiveDate};

/// Parse a CMS date: either a plain `YYYY-MM-DD` date field or an RFC 3339
/// timestamp such as `publishedAt`.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Format a date as `"Jan 2023"`. Unparseable input is returned unchanged.
#[must_use]
pub fn format_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format("%b %Y").to_string(),
        None => value.to_string(),
    }
}

/// Format a range as `"Jan 2023 - Mar 2024"`, or `"Jan 2023 - Present"` for
/// an open-ended one.
#[must_use]
pub fn format_date_range(start: &str, end: Option<&str>) -> String {
    let start = format_date(start);
    match end.filter(|e| !e.is_empty()) {
        Some(end) => format!("{start} - {}", format_date(end)),
        None => format!("{start} - Present"),
    }
}
