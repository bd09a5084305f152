use chrono::NaiveDate;

use crate::domain::models::Timestamp;
use crate::errors::DateParseError;

const SCHEDULE_FORMAT: &str = "%B %d, %Y";
const EVENT_FORMAT: &str = "%d-%b-%Y";
const DATE_PREFIX: &str = "Date:";
const RANGE_SEPARATOR: &str = " to ";

/// Parse a schedule date such as `"January 14, 2025"`
pub fn parse_schedule_date(text: &str) -> Result<Timestamp, DateParseError> {
    parse_day(text.trim(), SCHEDULE_FORMAT, "Month DD, YYYY")
}

/// Parse an event date: `"12-Oct-2024"`, `"31-May to 1-Jun-2025"` (range end wins),
/// optionally prefixed with `"Date: "`
pub fn parse_event_date(text: &str) -> Result<Timestamp, DateParseError> {
    let date = strip_prefix(text.trim());
    let end = range_end(date);
    parse_day(end, EVENT_FORMAT, "DD-Mon-YYYY or DD-Mon to DD-Mon-YYYY").map_err(|e| {
        DateParseError {
            input: text.to_string(),
            expected: e.expected,
        }
    })
}

fn strip_prefix(text: &str) -> &str {
    text.strip_prefix(DATE_PREFIX).map(str::trim).unwrap_or(text)
}

fn range_end(text: &str) -> &str {
    match text.rsplit_once(RANGE_SEPARATOR) {
        Some((_, end)) => end.trim(),
        None => text,
    }
}

fn parse_day(text: &str, format: &str, expected: &'static str) -> Result<Timestamp, DateParseError> {
    NaiveDate::parse_from_str(text, format)
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp())
        .ok_or_else(|| DateParseError {
            input: text.to_string(),
            expected,
        })
}
