//! Date parsing and display formatting shared by the adapters.
//!
//! Inbound dates are always `mm/dd/yy` - the format the agent prompts the
//! user for - and upstream APIs want ISO. Timestamps come back from the
//! shopping API as local ISO-8601 and are redisplayed as
//! `mm/dd/yy hh:mm AM/PM`. Prices are USD display strings.

use crate::tools::error::ToolError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const INPUT_FORMAT: &str = "%m/%d/%y";
const DISPLAY_FORMAT: &str = "%m/%d/%y %I:%M %p";

/// Parse a `mm/dd/yy` date argument.
///
/// Anything else - ISO dates, day-first ordering, garbage - is a
/// [`ToolError::DateFormat`], never a panic.
pub fn parse_travel_date(input: &str) -> Result<NaiveDate, ToolError> {
    NaiveDate::parse_from_str(input.trim(), INPUT_FORMAT)
        .map_err(|_| ToolError::date_format(input))
}

/// Render a date in the ISO form the upstream APIs expect.
pub fn to_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Reformat an upstream timestamp for display.
///
/// The shopping API emits local times without an offset
/// (`2025-12-13T14:30:00`); some suppliers append `Z` or an offset.
/// Unparsable input passes through unchanged rather than failing the
/// whole offer.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return dt.format(DISPLAY_FORMAT).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY_FORMAT).to_string();
    }
    raw.to_string()
}

/// Format an amount as a USD display string (`$412.80`).
pub fn usd(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Parse an amount back out of a USD display string.
///
/// Used for sorting offers on their display price. Unparsable input
/// sorts as zero.
pub fn parse_usd(text: &str) -> f64 {
    text.trim()
        .trim_start_matches('$')
        .replace(',', "")
        .parse()
        .unwrap_or(0.0)
}

/// Number of rental days between two dates, never less than one.
pub fn rental_days(pickup: NaiveDate, dropoff: NaiveDate) -> i64 {
    (dropoff - pickup).num_days().max(1)
}
