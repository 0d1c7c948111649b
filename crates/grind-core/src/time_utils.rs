//! Calendar helpers shared by the ingestion pipeline and the dashboard.
//!
//! Everything here works on naive (timezone-free) dates so that the weekday
//! derived for a row always agrees with the date the parser produced.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use crate::error::{GrindError, Result};

/// Weekdays in display order.
pub const WEEKDAY_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Formats accepted for daily activity dates, tried in order.
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];

/// Formats accepted for minute-level sleep timestamps, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse an activity date such as `"3/12/2016"` or `"2016-03-12"`.
pub fn parse_activity_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| GrindError::DateParse(s.to_string()))
}

/// Parse a sleep sample timestamp such as `"4/12/2016 2:47:30 AM"`.
pub fn parse_sleep_timestamp(s: &str) -> Result<NaiveDateTime> {
    let trimmed = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| GrindError::TimestampParse(s.to_string()))
}

/// Calendar day of a sleep timestamp, with the time of day discarded.
///
/// A bare date (no time component) is accepted as well.
pub fn sleep_sample_date(s: &str) -> Result<NaiveDate> {
    match parse_sleep_timestamp(s) {
        Ok(ts) => Ok(ts.date()),
        Err(ts_err) => parse_activity_date(s).map_err(|_| ts_err),
    }
}

/// English name of a weekday, e.g. `"Monday"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// English weekday name of a calendar date.
pub fn date_weekday_name(date: NaiveDate) -> &'static str {
    weekday_name(date.weekday())
}

/// Three-letter label used on chart axes, e.g. `"Mon"`.
pub fn weekday_short_name(day: Weekday) -> &'static str {
    &weekday_name(day)[..3]
}

/// Position of `day` within [`WEEKDAY_ORDER`] (Monday = 0).
pub fn weekday_index(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

/// Parse a `YYYY-MM-DD` date given on the command line.
pub fn parse_cli_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got \"{s}\": {e}"))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
