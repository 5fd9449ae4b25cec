//! Date/time normalization to a fixed-offset instant.
//!
//! Imports run on machines in arbitrary timezones; every parsed instant is
//! anchored to the fixed UTC-3 offset so the same spreadsheet produces the
//! same data everywhere.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use lote_model::default_offset;

const DATETIME_FORMATS: [&str; 5] = [
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%Y-%m-%d"];

/// Parses `dd/mm/yyyy`, `dd/mm/yyyy hh:mm[:ss]`, or ISO 8601 input into an
/// instant at the fixed import offset. Unparseable input yields `None`,
/// never an error.
pub fn normalize_datetime(raw: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let offset = default_offset();

    // Offset-carrying ISO 8601 is taken at face value, then re-anchored.
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(instant.with_timezone(&offset));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return naive.and_local_timezone(offset).single();
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date
                .and_time(NaiveTime::MIN)
                .and_local_timezone(offset)
                .single();
        }
    }
    None
}
