//! UTC timestamp helpers for the epoch-millisecond values used everywhere.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("cannot parse {0:?} as a UTC timestamp")]
pub struct TimeParseError(pub String);

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a point in time into epoch milliseconds.
///
/// Accepts RFC 3339 (`2024-01-01T00:00:00Z`), zone-less date-times which are
/// taken as UTC (`2024-01-01T09:30`), bare dates (midnight UTC) and raw
/// epoch milliseconds.
pub fn parse_utc_timestamp(input: &str) -> Result<i64, TimeParseError> {
    let s = input.trim();

    if let Ok(ms) = s.parse::<i64>() {
        return Ok(ms);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.timestamp_millis());
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc().timestamp_millis());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().timestamp_millis());
        }
    }

    Err(TimeParseError(input.to_string()))
}

/// ISO 8601 with millisecond precision, e.g. `2024-01-01T00:00:00.000Z`.
pub fn format_timestamp(ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(ms) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => ms.to_string(),
    }
}
