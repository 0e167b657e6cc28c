//! Unix-second timestamps with reserved sentinel infinities.

use {
    chrono::{NaiveDate, NaiveDateTime},
    thiserror::Error,
};

/// Seconds since the Unix epoch, with two reserved sentinel values standing
/// in for an unbounded past/future. The sentinels compare as expected
/// (`MIN < everything < MAX`) but must never be added or subtracted.
pub type Time = i64;

pub const MIN: Time = i64::MIN;
pub const MAX: Time = i64::MAX;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("unparseable date '{0}'")]
    Unparseable(String),
}

/// Parses `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`, both UTC, date-only implying
/// midnight. Never goes through floating point or local-timezone lookups.
pub fn parse(s: &str) -> Result<Time, TimeParseError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.and_utc().timestamp());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always a valid time")
            .and_utc()
            .timestamp());
    }
    Err(TimeParseError::Unparseable(s.to_string()))
}
