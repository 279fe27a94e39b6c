//! Parsers shared by the input forms.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use crate::domain::errors::ValidationErrors;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid regex"));

pub(crate) const REQUIRED: &str = "is required";

/// Trimmed value, or records `is required` and returns `None`.
pub(crate) fn required<'a>(
    errors: &mut ValidationErrors,
    field: &str,
    value: &'a str,
) -> Option<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, REQUIRED);
        None
    } else {
        Some(trimmed)
    }
}

/// Trimmed value, `None` when blank.
pub(crate) fn optional(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

pub(crate) fn max_chars(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.add(field, format!("must be at most {max} characters"));
    }
}

#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

/// Parses a positive integer identifier.
pub(crate) fn parse_id(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().filter(|id| *id > 0)
}

/// Parses a comma separated list of positive identifiers.
pub(crate) fn parse_id_list(value: &str) -> Result<Vec<u64>, String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse_id(part).ok_or_else(|| format!("`{part}` is not a valid id")))
        .collect()
}

#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Parses `HH:MM` (24-hour) or `h:MM am|pm`.
#[must_use]
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let normalized = value.trim().to_ascii_lowercase();
    let (clock, meridiem) = if let Some(rest) = normalized.strip_suffix("am") {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = normalized.strip_suffix("pm") {
        (rest.trim_end(), Some(true))
    } else {
        (normalized.as_str(), None)
    };

    let (hour, minute) = clock.split_once(':')?;
    if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
        return None;
    }
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;

    let hour = match meridiem {
        None => hour,
        Some(_) if hour == 0 || hour > 12 => return None,
        Some(false) => hour % 12,
        Some(true) => hour % 12 + 12,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Parses a non-negative decimal number of hours; blank means zero.
pub(crate) fn parse_hours(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|hours| hours.is_finite() && *hours >= 0.0)
}
