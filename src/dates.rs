//! Date parsing and week arithmetic for schedule display.
//!
//! Weeks start on Monday. Sheets state their week with free-form dates, so
//! [`parse_flexible_date()`] accepts a handful of spellings. Dotted dates are
//! read day first (`24.06.2024`) while slashed dates are read month first
//! (`06/24/2024`); existing sheets rely on both readings.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use regex::Regex;
use serde::Serialize;

const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%A, %B %d, %Y",
    "%a, %d %b %Y",
    "%a %b %d %Y",
];

const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn dotted_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{4})$").expect("valid regex"))
}

fn slashed_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("valid regex"))
}

/// Parses `D.M.YYYY`, `M/D/YYYY`, or a general date spelling.
///
/// Returns `None` when nothing matches.
pub fn parse_flexible_date(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }
    if let Some((day, month, year)) = numeric_parts(dotted_pattern(), value) {
        return calendar_date(year, month, day);
    }
    if let Some((month, day, year)) = numeric_parts(slashed_pattern(), value) {
        return calendar_date(year, month, day);
    }
    parse_general_date(value.trim())
}

fn numeric_parts(pattern: &Regex, value: &str) -> Option<(u32, u32, i32)> {
    let caps = pattern.captures(value)?;
    let first = caps[1].parse().ok()?;
    let second = caps[2].parse().ok()?;
    let year = caps[3].parse().ok()?;
    Some((first, second, year))
}

/// Builds a date from possibly out-of-range parts, rolling overflow into the
/// following month or year (`31.02` is 2 March, day `0` is the previous
/// month's last day).
fn calendar_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let month_index = i64::from(month) - 1;
    let year = i64::from(year) + month_index.div_euclid(12);
    let month = u32::try_from(month_index.rem_euclid(12)).ok()? + 1;
    let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)?;
    first.checked_add_signed(TimeDelta::try_days(i64::from(day) - 1)?)
}

fn parse_general_date(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }
    for fmt in FALLBACK_DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, fmt) {
            return Some(parsed);
        }
    }
    for fmt in FALLBACK_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(parsed.date());
        }
    }
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        .map(|parsed| parsed.date_naive())
        .ok()
}

/// Monday of the week containing `date`. Sunday belongs to the week that
/// started six days earlier.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = i64::from(date.weekday().num_days_from_monday());
    date.checked_sub_signed(TimeDelta::days(offset))
        .unwrap_or(date)
}

/// The seven dates starting at `start`.
pub fn week_days(start: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take(7).collect()
}

pub fn add_weeks(date: NaiveDate, weeks: i32) -> NaiveDate {
    TimeDelta::try_weeks(i64::from(weeks))
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(date)
}

/// Heading for the week starting at `start`, e.g. `June 24 - 30, 2024` or
/// `October 28 - November 3, 2024`.
pub fn format_date_range(start: NaiveDate) -> String {
    let end = start
        .checked_add_signed(TimeDelta::days(6))
        .unwrap_or(start);
    let start_month = start.format("%B").to_string();
    let end_month = end.format("%B").to_string();
    if start_month == end_month {
        format!(
            "{start_month} {} - {}, {}",
            start.day(),
            end.day(),
            start.year()
        )
    } else {
        format!(
            "{start_month} {} - {end_month} {}, {}",
            start.day(),
            end.day(),
            end.year()
        )
    }
}

/// Lowercase English weekday name, matched against day column headers.
pub fn day_identifier(date: NaiveDate) -> String {
    date.format("%A").to_string().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayHeader {
    pub day: String,
    pub date: u32,
}

pub fn day_header_parts(date: NaiveDate) -> DayHeader {
    DayHeader {
        day: date.format("%a").to_string(),
        date: date.day(),
    }
}
