//! Business-rule validation for recall records
//!
//! Each rule is a pure function returning a [`ValidationResult`] with a
//! human-readable failure reason. The top-level [`is_valid`] check evaluates
//! every rule rather than short-circuiting, logs all collected reasons, and
//! returns the single boolean the pipeline consumes. Records failing
//! validation are never persisted; the comparer substitutes or drops them.

use crate::app::models::{BuildRange, DateValue, RecallRecord};
use crate::constants::{TWO_DIGIT_YEAR_EPOCH, VALID_PRODUCT_GROUPS};
use chrono::{Datelike, NaiveDate, Utc};
use tracing::{info, warn};

/// Outcome of a single validation rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub failure_reason: String,
}

impl ValidationResult {
    fn ok() -> Self {
        Self {
            is_valid: true,
            failure_reason: String::new(),
        }
    }

    fn fail(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            failure_reason: reason.into(),
        }
    }
}

/// Validate a recall record against all business rules.
///
/// Evaluates every rule, logs each failure reason, returns whether the
/// record is eligible for persistence.
pub fn is_valid(record: &RecallRecord) -> bool {
    is_valid_at(record, Utc::now().date_naive())
}

/// Validate against a fixed "today", for deterministic evaluation
pub fn is_valid_at(record: &RecallRecord, today: NaiveDate) -> bool {
    let results = [
        is_launch_date_valid(record.launch_date.as_ref(), today),
        is_recall_number_valid(&record.recall_number, today),
        is_vehicle_count_valid(record.vehicle_count.as_deref()),
        is_build_range_valid(&record.build_ranges, record.launch_date.as_ref()),
        are_required_values_not_empty(record),
    ];

    let failure_reasons: Vec<&str> = results
        .iter()
        .filter(|result| !result.is_valid)
        .map(|result| result.failure_reason.as_str())
        .collect();

    if failure_reasons.is_empty() {
        return true;
    }

    warn!(
        "Recall {} {} with recall number {} is invalid",
        record.make.as_deref().unwrap_or_default(),
        record.model.as_deref().unwrap_or_default(),
        record.recall_number
    );
    for reason in failure_reasons {
        info!("Reason: {}", reason);
    }

    false
}

/// Launch date must be present, parseable and not in the future
pub fn is_launch_date_valid(launch_date: Option<&DateValue>, today: NaiveDate) -> ValidationResult {
    match launch_date {
        None | Some(DateValue::Invalid) => {
            ValidationResult::fail("Launch date is empty or has invalid format.")
        }
        Some(DateValue::Date(date)) => {
            if *date <= today {
                ValidationResult::ok()
            } else {
                ValidationResult::fail("Launch date occurs in the future.")
            }
        }
    }
}

/// Recall number must be GROUP/YEAR/SEQ with a known product group and a
/// 2- or 4-digit year that is not in the future (2-digit years are 1900+YY)
pub fn is_recall_number_valid(recall_number: &str, today: NaiveDate) -> ValidationResult {
    let tokens: Vec<&str> = recall_number.split('/').collect();
    let [group, year, sequence] = tokens.as_slice() else {
        return ValidationResult::fail("Recall number has invalid syntax.");
    };

    let year_is_numeric = !year.is_empty() && year.chars().all(|c| c.is_ascii_digit());
    if group.is_empty() || sequence.is_empty() || !year_is_numeric {
        return ValidationResult::fail("Recall number has invalid syntax.");
    }
    if year.len() != 2 && year.len() != 4 {
        return ValidationResult::fail("Recall number has invalid syntax.");
    }

    let Ok(mut full_year) = year.parse::<i32>() else {
        return ValidationResult::fail("Recall number has invalid syntax.");
    };
    if year.len() == 2 {
        full_year += TWO_DIGIT_YEAR_EPOCH;
    }

    if VALID_PRODUCT_GROUPS.contains(group) && full_year <= today.year() {
        ValidationResult::ok()
    } else {
        ValidationResult::fail(
            "Recall number's product group is invalid or year occurs in the future.",
        )
    }
}

/// Vehicle count must parse as an integer
pub fn is_vehicle_count_valid(vehicle_count: Option<&str>) -> ValidationResult {
    let parses = vehicle_count
        .map(|count| count.parse::<i64>().is_ok())
        .unwrap_or(false);

    if parses {
        ValidationResult::ok()
    } else {
        ValidationResult::fail("Vehicle number is not a number.")
    }
}

/// Every build range must be internally consistent and start on or before
/// the launch date. One bad range invalidates the whole record.
pub fn is_build_range_valid(
    build_ranges: &[BuildRange],
    launch_date: Option<&DateValue>,
) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for range in build_ranges {
        let start = is_build_start_valid(range.start.as_ref(), launch_date);
        let end = is_build_end_valid(range.start.as_ref(), range.end.as_ref());

        if !start.is_valid || !end.is_valid {
            let reason = [start.failure_reason.as_str(), end.failure_reason.as_str()]
                .iter()
                .filter(|r| !r.is_empty())
                .cloned()
                .collect::<Vec<_>>()
                .join(" ");
            result = ValidationResult::fail(reason);
        }
    }

    result
}

/// Build start, when present, must be parseable and not after the launch date
pub fn is_build_start_valid(
    build_start: Option<&DateValue>,
    launch_date: Option<&DateValue>,
) -> ValidationResult {
    match build_start {
        None => ValidationResult::ok(),
        Some(DateValue::Invalid) => ValidationResult::fail("Build start has invalid format."),
        Some(DateValue::Date(start)) => match launch_date.and_then(|date| date.as_date()) {
            Some(launch) if *start <= launch => ValidationResult::ok(),
            _ => ValidationResult::fail("Build start occurs after launch date."),
        },
    }
}

/// Build end, when present, must be parseable and not before the build start
pub fn is_build_end_valid(
    build_start: Option<&DateValue>,
    build_end: Option<&DateValue>,
) -> ValidationResult {
    match build_end {
        None => ValidationResult::ok(),
        Some(DateValue::Invalid) => ValidationResult::fail("Build end has invalid format."),
        Some(DateValue::Date(end)) => match build_start.and_then(|date| date.as_date()) {
            Some(start) if *end < start => {
                ValidationResult::fail("Build end occurs before build start.")
            }
            _ => ValidationResult::ok(),
        },
    }
}

/// Make, concern, defect, remedy and model must all be non-empty
pub fn are_required_values_not_empty(record: &RecallRecord) -> ValidationResult {
    let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());

    if present(&record.make)
        && present(&record.concern)
        && present(&record.defect)
        && present(&record.remedy)
        && present(&record.model)
    {
        ValidationResult::ok()
    } else {
        ValidationResult::fail("One of required values (make, concern, defect, remedy, model) is empty.")
    }
}
