//! Core recalls CSV parser implementation
//!
//! Handles decoding, header-driven column lookup, the required-field row
//! policy and merging of duplicate rows into multi-range recall records.

use csv::StringRecord;
use std::collections::HashMap;
use std::collections::btree_map::Entry;
use tracing::{debug, info, warn};

use super::date::parse_slash_date;
use super::decoder::decode;
use super::stats::{ParseStats, RecallsCollection};
use crate::app::models::{RecallRecord, RecallsSnapshot};
use crate::constants::columns;
use crate::{Error, Result};

/// Parser for the recalls CSV export
///
/// Column lookup is header-driven rather than positional, so the parser
/// tolerates column reordering in the export. Quoting and embedded newlines
/// are handled by the CSV reader.
#[derive(Debug)]
pub struct CsvRecallsParser {
    data: String,
}

/// Header-driven column lookup for one parsed file
#[derive(Debug)]
struct ColumnIndex {
    name_to_index: HashMap<String, usize>,
}

impl ColumnIndex {
    fn analyze(headers: &StringRecord) -> Self {
        let name_to_index = headers
            .iter()
            .enumerate()
            .map(|(index, name)| (name.trim().to_string(), index))
            .collect();
        Self { name_to_index }
    }

    /// Fetch a trimmed field by column name; empty fields come back as None
    fn field(&self, record: &StringRecord, column: &str) -> Option<String> {
        let index = *self.name_to_index.get(column)?;
        let value = record.get(index)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

impl CsvRecallsParser {
    /// Create a parser from raw source bytes and their encoding label
    pub fn from_bytes(bytes: &[u8], encoding_label: &str) -> Result<Self> {
        let data = decode(bytes, encoding_label)?;
        Ok(Self { data })
    }

    /// Create a parser from already decoded UTF-8 text
    pub fn new(data: String) -> Self {
        Self { data }
    }

    /// Parse the CSV export into a merged recall collection
    pub fn parse(&self) -> Result<RecallsCollection> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(self.data.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| Error::csv_parsing("failed to read CSV headers", Some(e)))?;
        let index = ColumnIndex::analyze(headers);
        debug!("CSV header declares {} columns", headers.len());

        let mut recalls = RecallsSnapshot::new();
        let mut missing_model = Vec::new();
        let mut stats = ParseStats::new();

        for result in reader.records() {
            stats.total_rows += 1;

            match result {
                Ok(record) => {
                    self.process_row(&index, &record, &mut recalls, &mut missing_model, &mut stats);
                }
                Err(e) => {
                    stats.dropped_rows += 1;
                    stats
                        .errors
                        .push(format!("CSV error at row {}: {}", stats.total_rows, e));
                    warn!("Skipped unreadable CSV row {}: {}", stats.total_rows, e);
                }
            }
        }

        info!("Parsed recalls CSV: {}", stats.summary());

        Ok(RecallsCollection {
            recalls,
            missing_model,
            stats,
        })
    }

    /// Apply the required-field policy to one row and fold it into the output
    fn process_row(
        &self,
        index: &ColumnIndex,
        record: &StringRecord,
        recalls: &mut RecallsSnapshot,
        missing_model: &mut Vec<RecallRecord>,
        stats: &mut ParseStats,
    ) {
        let make = index.field(record, columns::MAKE);
        let model = index.field(record, columns::MODEL);
        let remedy = index.field(record, columns::REMEDY);
        let recall_number = index.field(record, columns::RECALLS_NUMBER);

        let missing: Vec<&str> = [
            (make.is_none(), columns::MAKE),
            (model.is_none(), columns::MODEL),
            (remedy.is_none(), columns::REMEDY),
            (recall_number.is_none(), columns::RECALLS_NUMBER),
        ]
        .iter()
        .filter(|(absent, _)| *absent)
        .map(|(_, name)| *name)
        .collect();

        if missing.is_empty() {
            let recall = self.row_to_recall(index, record);
            self.add_or_merge(recall, recalls, stats);
            stats.parsed_rows += 1;
        } else if missing == [columns::MODEL] {
            // The recall number still exists under this make; keep the row
            // aside so it can suppress deletions, but never persist it.
            debug!(
                "Row {} has no model for make '{}', recall number '{}'",
                stats.total_rows,
                make.as_deref().unwrap_or_default(),
                recall_number.as_deref().unwrap_or_default()
            );
            missing_model.push(self.row_to_recall(index, record));
            stats.missing_model_rows += 1;
        } else {
            warn!(
                "Dropped row {}: missing required fields: {}",
                stats.total_rows,
                missing.join(", ")
            );
            stats.dropped_rows += 1;
        }
    }

    /// Build a recall record from one CSV row
    fn row_to_recall(&self, index: &ColumnIndex, record: &StringRecord) -> RecallRecord {
        let date_field = |column: &str| {
            index
                .field(record, column)
                .and_then(|value| parse_slash_date(&value))
        };

        RecallRecord::new(
            date_field(columns::LAUNCH_DATE),
            index
                .field(record, columns::RECALLS_NUMBER)
                .unwrap_or_default(),
            index.field(record, columns::MAKE),
            index.field(record, columns::CONCERN),
            index.field(record, columns::DEFECT),
            index.field(record, columns::REMEDY),
            index.field(record, columns::VEHICLE_NUMBERS),
            index.field(record, columns::MODEL),
            index.field(record, columns::VIN_START),
            index.field(record, columns::VIN_END),
            date_field(columns::BUILD_START),
            date_field(columns::BUILD_END),
        )
    }

    /// Insert a recall into the map, or merge its ranges into the existing
    /// entry when the natural key was already seen. The newer row's scalar
    /// fields win; ranges accumulate (existing first, then new).
    fn add_or_merge(
        &self,
        recall: RecallRecord,
        recalls: &mut RecallsSnapshot,
        stats: &mut ParseStats,
    ) {
        let Some(key) = recall.key() else {
            // Rows reaching this point always carry make and model.
            warn!(
                "Recall '{}' has no natural key, dropping",
                recall.make_model_recall_number
            );
            stats.dropped_rows += 1;
            return;
        };

        match recalls.entry(key) {
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                let mut merged = recall;

                let mut vin_ranges = std::mem::take(&mut existing.vin_ranges);
                vin_ranges.append(&mut merged.vin_ranges);
                merged.vin_ranges = vin_ranges;

                let mut build_ranges = std::mem::take(&mut existing.build_ranges);
                build_ranges.append(&mut merged.build_ranges);
                merged.build_ranges = build_ranges;

                *existing = merged;
                stats.merged_rows += 1;
            }
            Entry::Vacant(entry) => {
                entry.insert(recall);
            }
        }
    }
}
