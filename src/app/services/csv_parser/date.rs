//! Slash-format date normalization
//!
//! The recalls export writes dates as `dd/mm/yyyy`. Parsing distinguishes
//! three outcomes the rest of the pipeline relies on:
//! - `None` - the field was absent or blank
//! - `Some(DateValue::Invalid)` - input was present but malformed
//! - `Some(DateValue::Date(..))` - a real calendar date
//!
//! Future-dated values are not rejected here; that is a validation concern.

use crate::app::models::DateValue;
use crate::constants::TWO_DIGIT_YEAR_EPOCH;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

static SLASH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d+)$").expect("slash date pattern"));

/// Parse a `dd/mm/yyyy` date field.
///
/// Years must have 2 or 4 digits; 2-digit years map to 1900+YY (inherited
/// source-system behavior, see [`TWO_DIGIT_YEAR_EPOCH`]). Anything that does
/// not match the pattern or fails calendar validation yields the invalid
/// sentinel, which is distinct from an absent field.
pub fn parse_slash_date(raw: &str) -> Option<DateValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Some(captures) = SLASH_DATE.captures(trimmed) else {
        warn!(
            "Unable to parse date '{}', expected format dd/mm/yyyy",
            trimmed
        );
        return Some(DateValue::Invalid);
    };

    let year_text = &captures[3];
    if year_text.len() != 2 && year_text.len() != 4 {
        warn!(
            "Unable to parse date '{}', year must have 2 or 4 digits",
            trimmed
        );
        return Some(DateValue::Invalid);
    }

    let date = parse_parts(&captures[1], &captures[2], year_text);
    match date {
        Some(date) => Some(DateValue::Date(date)),
        None => {
            warn!("Date '{}' is not a valid calendar date", trimmed);
            Some(DateValue::Invalid)
        }
    }
}

/// Convert a `dd/mm/yyyy` field to its `yyyy-mm-dd` wire rendering.
/// Returns `None` for absent input and `"invalid"` for malformed input.
pub fn slash_format_to_iso(raw: &str) -> Option<String> {
    parse_slash_date(raw).map(|value| value.to_iso())
}

fn parse_parts(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let mut full_year: i32 = year.parse().ok()?;
    if year.len() == 2 {
        full_year += TWO_DIGIT_YEAR_EPOCH;
    }
    NaiveDate::from_ymd_opt(full_year, month, day)
}
