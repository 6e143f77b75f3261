//! Parsing of the French `08h30` / `09h` wall-clock notation and `DD/MM/YYYY` dates
//! used by the EdT pages.

use crate::utils::error::{EdtError, Result};
use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::LazyLock;

static CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})h(\d{2})?$").expect("clock regex"));
static CLOCK_IN_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}h\d{2}").expect("clock search regex"));
static DATE_IN_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2}/\d{2}/\d{4})").expect("date regex"));

/// Parses `HHhMM` or the hour-only `HHh` (minutes default to `00`).
pub fn parse_clock(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    let caps = CLOCK_RE
        .captures(value)
        .ok_or_else(|| EdtError::malformed("time", format!("'{}' is not an HHhMM time", value)))?;

    let hour: u32 = caps[1]
        .parse()
        .map_err(|_| EdtError::malformed("time", format!("bad hour in '{}'", value)))?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m
            .as_str()
            .parse()
            .map_err(|_| EdtError::malformed("time", format!("bad minutes in '{}'", value)))?,
        None => 0,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| EdtError::malformed("time", format!("'{}' is out of range", value)))
}

/// Hour component of an `HHh...` value.
pub fn parse_hour(value: &str) -> Result<u32> {
    let value = value.trim();
    value
        .split_once('h')
        .and_then(|(hour, _)| hour.parse::<u32>().ok())
        .filter(|hour| *hour < 24)
        .ok_or_else(|| EdtError::malformed("time", format!("no hour in '{}'", value)))
}

/// First `HHhMM` occurrence anywhere in `text`.
pub fn find_clock(text: &str) -> Option<&str> {
    CLOCK_IN_TEXT_RE.find(text).map(|m| m.as_str())
}

/// First `DD/MM/YYYY` occurrence anywhere in `text`.
pub fn find_date(text: &str) -> Result<Option<NaiveDate>> {
    let Some(caps) = DATE_IN_TEXT_RE.captures(text) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(&caps[1], "%d/%m/%Y")
        .map(Some)
        .map_err(|e| EdtError::malformed("date", format!("'{}': {}", &caps[1], e)))
}

/// Attaches `tz` to a wall-clock date and time. A DST fold resolves to the
/// earlier instant; a time inside a DST gap does not exist and is rejected.
pub fn localize(date: NaiveDate, time: NaiveTime, tz: Tz) -> Result<DateTime<Tz>> {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(EdtError::TimezoneError {
            value: format!("{} does not exist in {}", naive, tz.name()),
        }),
    }
}
