//! Run statistics for the data-update pipeline

use crate::app::services::csv_parser::ParseStats;
use std::time::Duration;

/// Statistics accumulated over one data-update run
#[derive(Debug, Clone, Default)]
pub struct UpdateStats {
    /// Parsing statistics from the parse stage
    pub parse: ParseStats,

    /// Upsert counts per resource type
    pub modified_recalls: usize,
    pub modified_makes: usize,
    pub modified_models: usize,

    /// Deletion counts per resource type
    pub deleted_recalls: usize,
    pub deleted_makes: usize,
    pub deleted_models: usize,

    /// Whether the source file was archived
    pub archived: bool,

    /// Total run duration
    pub duration: Duration,
}

impl UpdateStats {
    /// One-line summary for log output
    pub fn summary(&self) -> String {
        format!(
            "upserted {}/{}/{} and deleted {}/{}/{} recalls/makes/models in {:.2}s ({})",
            self.modified_recalls,
            self.modified_makes,
            self.modified_models,
            self.deleted_recalls,
            self.deleted_makes,
            self.deleted_models,
            self.duration.as_secs_f64(),
            self.parse.summary()
        )
    }
}
