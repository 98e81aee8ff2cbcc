//! Parsing statistics and result structures for the recalls CSV export

use crate::app::models::{RecallRecord, RecallsSnapshot};

/// Everything extracted from one CSV export
#[derive(Debug, Clone, Default)]
pub struct RecallsCollection {
    /// Merged recall records keyed by their natural key
    pub recalls: RecallsSnapshot,

    /// Rows that were missing only the model. These signal that the recall
    /// number still exists under the make and must suppress deletions, but
    /// they never enter the main map.
    pub missing_model: Vec<RecallRecord>,

    /// Parsing statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of data rows encountered
    pub total_rows: usize,

    /// Number of rows converted into recall records
    pub parsed_rows: usize,

    /// Number of rows merged into an already seen recall
    pub merged_rows: usize,

    /// Number of rows kept aside because only the model was missing
    pub missing_model_rows: usize,

    /// Number of rows dropped for missing required fields or CSV errors
    pub dropped_rows: usize,

    /// Row-level errors for debugging
    pub errors: Vec<String>,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of rows that produced or enriched a recall record
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.parsed_rows as f64 / self.total_rows as f64) * 100.0
        }
    }

    /// One-line summary for log output
    pub fn summary(&self) -> String {
        format!(
            "{} rows: {} parsed ({} merged), {} missing model, {} dropped",
            self.total_rows,
            self.parsed_rows,
            self.merged_rows,
            self.missing_model_rows,
            self.dropped_rows
        )
    }
}
