//! Tests for slash-format date normalization

use crate::app::models::DateValue;
use crate::app::services::csv_parser::date::{parse_slash_date, slash_format_to_iso};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> DateValue {
    DateValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

#[test]
fn test_parses_four_digit_year() {
    assert_eq!(parse_slash_date("29/05/2015"), Some(date(2015, 5, 29)));
    assert_eq!(parse_slash_date("1/2/2003"), Some(date(2003, 2, 1)));
}

#[test]
fn test_two_digit_year_maps_to_nineteen_hundreds() {
    assert_eq!(parse_slash_date("12/01/98"), Some(date(1998, 1, 12)));
    assert_eq!(parse_slash_date("12/01/15"), Some(date(1915, 1, 12)));
}

#[test]
fn test_absent_input_is_none_not_invalid() {
    assert_eq!(parse_slash_date(""), None);
    assert_eq!(parse_slash_date("   "), None);
}

#[test]
fn test_malformed_input_is_invalid_sentinel() {
    assert_eq!(parse_slash_date("not a date"), Some(DateValue::Invalid));
    assert_eq!(parse_slash_date("2015-05-29"), Some(DateValue::Invalid));
    assert_eq!(parse_slash_date("29/05/2015 extra"), Some(DateValue::Invalid));
}

#[test]
fn test_year_must_have_two_or_four_digits() {
    assert_eq!(parse_slash_date("29/05/20155"), Some(DateValue::Invalid));
    assert_eq!(parse_slash_date("29/05/205"), Some(DateValue::Invalid));
}

#[test]
fn test_calendar_validation() {
    assert_eq!(parse_slash_date("32/01/2015"), Some(DateValue::Invalid));
    assert_eq!(parse_slash_date("29/02/2015"), Some(DateValue::Invalid));
    assert_eq!(parse_slash_date("29/02/2016"), Some(date(2016, 2, 29)));
    assert_eq!(parse_slash_date("01/13/2015"), Some(DateValue::Invalid));
}

#[test]
fn test_iso_round_trip() {
    assert_eq!(
        slash_format_to_iso("29/05/2015"),
        Some("2015-05-29".to_string())
    );
    assert_eq!(
        slash_format_to_iso("32/05/2015"),
        Some("invalid".to_string())
    );
    assert_eq!(slash_format_to_iso(""), None);
}
