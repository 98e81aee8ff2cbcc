//! Test fixtures shared across comparer test modules

// Test modules
mod makes_models_tests;

use crate::app::models::{DateValue, RecallRecord, RecallsSnapshot};
use chrono::NaiveDate;

pub fn launch_date() -> DateValue {
    DateValue::Date(NaiveDate::from_ymd_opt(2020, 1, 15).unwrap())
}

/// A recall record that passes validation
pub fn recall(make: &str, model: &str, recall_number: &str) -> RecallRecord {
    RecallRecord::new(
        Some(launch_date()),
        recall_number.to_string(),
        Some(make.to_string()),
        Some("Concern".to_string()),
        Some("Defect".to_string()),
        Some("Remedy".to_string()),
        Some("100".to_string()),
        Some(model.to_string()),
        None,
        None,
        None,
        None,
    )
}

/// A recall record with one VIN range
pub fn recall_with_vins(
    make: &str,
    model: &str,
    recall_number: &str,
    vin_start: &str,
    vin_end: &str,
) -> RecallRecord {
    RecallRecord::new(
        Some(launch_date()),
        recall_number.to_string(),
        Some(make.to_string()),
        Some("Concern".to_string()),
        Some("Defect".to_string()),
        Some("Remedy".to_string()),
        Some("100".to_string()),
        Some(model.to_string()),
        Some(vin_start.to_string()),
        Some(vin_end.to_string()),
        None,
        None,
    )
}

/// A missing-model row as produced by the parser's side list
pub fn missing_model_row(make: &str, recall_number: &str) -> RecallRecord {
    RecallRecord::new(
        Some(launch_date()),
        recall_number.to_string(),
        Some(make.to_string()),
        Some("Concern".to_string()),
        Some("Defect".to_string()),
        Some("Remedy".to_string()),
        Some("100".to_string()),
        None,
        None,
        None,
        None,
        None,
    )
}

/// Build a snapshot from records that all carry a natural key
pub fn snapshot(records: Vec<RecallRecord>) -> RecallsSnapshot {
    records
        .into_iter()
        .map(|record| (record.key().expect("fixture records have keys"), record))
        .collect()
}
