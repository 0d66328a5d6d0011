//! Calendar-date normalization.
//!
//! Expense dates carry no time-of-day meaning, but the remote store may send
//! them as full timestamps (a stored `2024-01-05` comes back as
//! `2024-01-05T00:00:00.000Z`). Everything is reduced to the [`NaiveDate`]
//! written in the timestamp before it enters the store, so filters compare
//! calendar dates only and an unchanged record round-trips to the same day.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::EngineError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reduces a wire date to a calendar date.
///
/// Accepted shapes:
/// - `2024-01-05`
/// - `2024-01-05T18:00:00` (optionally with fractional seconds), taken as is
/// - RFC 3339 with offset (`2024-01-05T18:00:00.000Z`), day as written in its
///   own offset
pub fn normalize_date(raw: &str) -> Result<NaiveDate, EngineError> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(stamp.date_naive());
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(stamp.date());
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(stamp.date());
    }

    Err(EngineError::invalid(format!("invalid date \"{raw}\"")))
}

/// Parses a date typed by the user (`YYYY-MM-DD`).
pub fn parse_date(raw: &str) -> Result<NaiveDate, EngineError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        EngineError::invalid(format!("invalid date \"{raw}\", expected YYYY-MM-DD"))
    })
}

/// Current calendar date in `tz`.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Formats a calendar date the way the remote store expects it.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
