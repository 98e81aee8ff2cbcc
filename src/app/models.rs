//! Data models for recall processing
//!
//! This module contains the core data structures for representing recall
//! records, the derived make/model lookup records, and the snapshot maps
//! exchanged between the parser, the comparer and the backend client.

use crate::constants::{self, DATE_INVALID, ISO_DATE_FORMAT, KEY_SEPARATOR};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// =============================================================================
// Recall Category
// =============================================================================

/// Recall category, derived from the recall number's product group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vehicle,
    Equipment,
}

impl Category {
    /// Classify a recall number by its product group (the token before the
    /// first '/'). Groups outside the vehicle list are equipment recalls.
    pub fn from_recall_number(recall_number: &str) -> Self {
        if constants::is_vehicle_product_group(recall_number) {
            Category::Vehicle
        } else {
            Category::Equipment
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vehicle => "vehicle",
            Category::Equipment => "equipment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Dates
// =============================================================================

/// A recall date that is present in the source data: either a real
/// day-granularity date or the sentinel for input that failed to parse.
/// Absent dates are represented as `None` at the field level, so callers
/// can always distinguish "missing" from "malformed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateValue {
    /// Input was present but could not be parsed
    Invalid,
    /// A parsed calendar date
    Date(NaiveDate),
}

impl DateValue {
    /// Parse the wire rendering ("invalid" or "yyyy-mm-dd")
    pub fn from_wire(value: &str) -> Self {
        if value == DATE_INVALID {
            return DateValue::Invalid;
        }
        NaiveDate::parse_from_str(value, ISO_DATE_FORMAT)
            .map(DateValue::Date)
            .unwrap_or(DateValue::Invalid)
    }

    /// Wire rendering used by the storage schema
    pub fn to_iso(&self) -> String {
        match self {
            DateValue::Invalid => DATE_INVALID.to_string(),
            DateValue::Date(date) => date.format(ISO_DATE_FORMAT).to_string(),
        }
    }

    /// The underlying date, when the value parsed
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            DateValue::Invalid => None,
            DateValue::Date(date) => Some(*date),
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, DateValue::Invalid)
    }
}

impl Serialize for DateValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso())
    }
}

impl<'de> Deserialize<'de> for DateValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(DateValue::from_wire(&value))
    }
}

// =============================================================================
// Ranges
// =============================================================================

/// An optional start/end span covered by a recall. Both halves are optional;
/// a range object only exists when at least one half was present in the
/// source row. Absent halves are omitted from the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Range<T> {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub start: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub end: Option<T>,
}

impl<T> Range<T> {
    /// Build a range when at least one half is present
    pub fn from_parts(start: Option<T>, end: Option<T>) -> Option<Self> {
        if start.is_none() && end.is_none() {
            None
        } else {
            Some(Self { start, end })
        }
    }
}

/// VIN span covered by a recall
pub type VinRange = Range<String>;

/// Build-date span covered by a recall
pub type BuildRange = Range<DateValue>;

// =============================================================================
// Composite Keys
// =============================================================================

/// Structured natural key of a recall record.
///
/// All in-memory maps are keyed by this tuple; the delimited
/// `make-model-recallNumber` string exists only as the storage primary key
/// carried on the record itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecallKey {
    pub make: String,
    pub model: String,
    pub recall_number: String,
}

impl RecallKey {
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        recall_number: impl Into<String>,
    ) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            recall_number: recall_number.into(),
        }
    }

    /// Flatten to the delimited storage form. Ambiguous when make or model
    /// contain the separator themselves; the collision risk is inherited
    /// from the downstream schema.
    pub fn flatten(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.make,
            self.model,
            self.recall_number,
            sep = KEY_SEPARATOR
        )
    }
}

impl fmt::Display for RecallKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flatten())
    }
}

/// Build the storage key grouping models under a category and make
pub fn category_make_key(category: Category, make: &str) -> String {
    format!("{}{}{}", category, KEY_SEPARATOR, make)
}

// =============================================================================
// Recall Record
// =============================================================================

/// A normalized recall record as exchanged with the recall store.
///
/// The struct holds exactly the field set used for change detection;
/// equality of two records is equality of that field set. Optional scalars
/// are `None` when the source field was empty and are omitted from the
/// serialized form, on both the stored and the freshly parsed side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecallRecord {
    /// Storage primary key (delimited composite of make, model and recall number)
    pub make_model_recall_number: String,

    /// Recall category derived from the recall number
    #[serde(rename = "type")]
    pub category: Category,

    /// Storage sort key grouping recalls by category, make and model
    #[serde(rename = "type_make_model")]
    pub category_make_model: String,

    /// Date the recall was launched
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub launch_date: Option<DateValue>,

    /// Recall number in GROUP/YEAR/SEQ format
    pub recall_number: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub make: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub concern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub defect: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub remedy: Option<String>,

    /// Number of affected vehicles, kept as the source's numeric string
    #[serde(
        rename = "vehicle_number",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub vehicle_count: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub model: Option<String>,

    /// VIN spans covered by this recall; accumulates across merged rows
    #[serde(rename = "vin_range", skip_serializing_if = "Vec::is_empty", default)]
    pub vin_ranges: Vec<VinRange>,

    /// Build-date spans covered by this recall; accumulates across merged rows
    #[serde(rename = "build_range", skip_serializing_if = "Vec::is_empty", default)]
    pub build_ranges: Vec<BuildRange>,
}

impl RecallRecord {
    /// Build a recall record from the raw source fields.
    ///
    /// Empty optional scalars are dropped entirely rather than stored as
    /// empty strings, so downstream equality never sees "" versus absent.
    /// Each VIN/build pair yields exactly one range entry when either half
    /// is present.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        launch_date: Option<DateValue>,
        recall_number: String,
        make: Option<String>,
        concern: Option<String>,
        defect: Option<String>,
        remedy: Option<String>,
        vehicle_count: Option<String>,
        model: Option<String>,
        vin_start: Option<String>,
        vin_end: Option<String>,
        build_start: Option<DateValue>,
        build_end: Option<DateValue>,
    ) -> Self {
        let make = non_empty(make);
        let model = non_empty(model);
        let category = Category::from_recall_number(&recall_number);

        let make_part = make.as_deref().unwrap_or_default();
        let model_part = model.as_deref().unwrap_or_default();
        let make_model_recall_number = format!(
            "{}{sep}{}{sep}{}",
            make_part,
            model_part,
            recall_number,
            sep = KEY_SEPARATOR
        );
        let category_make_model = format!(
            "{}{sep}{}{sep}{}",
            category,
            make_part,
            model_part,
            sep = KEY_SEPARATOR
        );

        let vin_ranges = Range::from_parts(non_empty(vin_start), non_empty(vin_end))
            .into_iter()
            .collect();
        let build_ranges = Range::from_parts(build_start, build_end).into_iter().collect();

        Self {
            make_model_recall_number,
            category,
            category_make_model,
            launch_date,
            recall_number,
            make,
            concern: non_empty(concern),
            defect: non_empty(defect),
            remedy: non_empty(remedy),
            vehicle_count: non_empty(vehicle_count),
            model,
            vin_ranges,
            build_ranges,
        }
    }

    /// The structured natural key, when make and model are both present
    pub fn key(&self) -> Option<RecallKey> {
        match (&self.make, &self.model) {
            (Some(make), Some(model)) => {
                Some(RecallKey::new(make, model, &self.recall_number))
            }
            _ => None,
        }
    }

    /// Sort both range lists by (start, end) so record equality is
    /// insensitive to the order ranges were accumulated in
    pub fn sort_ranges(&mut self) {
        self.vin_ranges.sort();
        self.build_ranges.sort();
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// =============================================================================
// Make and Model Lookup Records
// =============================================================================

/// Set of make names known for one recall category.
///
/// The set is kept sorted and deduplicated (`BTreeSet`), which is also the
/// serialized wire form expected by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeRecord {
    #[serde(rename = "type")]
    pub category: Category,
    pub makes: BTreeSet<String>,
}

impl MakeRecord {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            makes: BTreeSet::new(),
        }
    }

    /// Storage primary key of this record
    pub fn key(&self) -> String {
        self.category.to_string()
    }
}

/// Set of model names known for one category and make
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecord {
    #[serde(rename = "type_make")]
    pub category_make: String,
    pub models: BTreeSet<String>,
}

impl ModelRecord {
    pub fn new(category_make: impl Into<String>) -> Self {
        Self {
            category_make: category_make.into(),
            models: BTreeSet::new(),
        }
    }

    /// Storage primary key of this record
    pub fn key(&self) -> String {
        self.category_make.clone()
    }
}

// =============================================================================
// Snapshots
// =============================================================================

/// Full previous- or current-state mapping of recalls at comparison time
pub type RecallsSnapshot = BTreeMap<RecallKey, RecallRecord>;

/// Full previous- or current-state mapping of make records, keyed by category
pub type MakesSnapshot = BTreeMap<String, MakeRecord>;

/// Full previous- or current-state mapping of model records, keyed by
/// category-make
pub type ModelsSnapshot = BTreeMap<String, ModelRecord>;
