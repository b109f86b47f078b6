//! Field parsing utilities for planner export rows
//!
//! Helpers for turning cleaned field text into typed values with the
//! recovery rules the import pipeline expects: ventil numbers retry after
//! stripping non-digits, dates are tried against the known export formats.

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::OnceLock;

use crate::constants::{DAYS_UNKNOWN, EVENT_DATE_FORMATS};

/// Parse a ventil number from a cleaned field.
///
/// A plain integer parse is tried first; on failure every non-digit
/// character is stripped and the parse retried once ("Bucht 12" -> 12).
pub fn parse_ventil_number(value: &str) -> Option<i32> {
    if let Ok(number) = value.parse::<i32>() {
        return Some(number);
    }

    static NON_DIGITS: OnceLock<regex::Regex> = OnceLock::new();
    let re = NON_DIGITS.get_or_init(|| regex::Regex::new(r"[^\d]").expect("static pattern"));
    let digits_only = re.replace_all(value, "");
    if digits_only.is_empty() {
        return None;
    }
    digits_only.parse::<i32>().ok()
}

/// Parse an event date from a cleaned field.
///
/// Tries the German long form first ("13.07.2025"), then the two-digit-year
/// short form, then ISO. A `%Y` match below year 1000 is rejected so that
/// "5.7.25" falls through to `%y` and lands in 2025 instead of year 25.
pub fn parse_event_date(value: &str) -> Option<NaiveDate> {
    use chrono::Datelike;

    if value.is_empty() {
        return None;
    }
    EVENT_DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(value, format)
            .ok()
            .filter(|date| date.year() >= 1000)
    })
}

/// Whole days elapsed between the event date and `now`, truncated.
///
/// Returns the unknown sentinel when no date is present; future dates yield
/// negative values and classify as `Unknown` downstream.
pub fn days_since_event(event_date: Option<NaiveDate>, now: DateTime<Utc>) -> i32 {
    match event_date {
        Some(date) => (now.date_naive() - date).num_days() as i32,
        None => DAYS_UNKNOWN,
    }
}

/// A cleaned field as an optional value: empty text maps to `None`
pub fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
