//! Recall snapshot diffing
//!
//! The comparer owns both snapshots for the duration of a run. Range lists
//! on both sides are sorted at construction so record equality is
//! insensitive to the order ranges were accumulated in, and upserted
//! records always leave with sorted ranges.

use tracing::{debug, info};

use crate::app::models::{RecallRecord, RecallsSnapshot};
use crate::app::services::validator;

/// Compares previous and current recall snapshots
#[derive(Debug)]
pub struct RecallComparer {
    previous: RecallsSnapshot,
    current: RecallsSnapshot,
}

impl RecallComparer {
    /// Create a comparer over the two snapshots, normalizing range order on
    /// both sides
    pub fn new(mut previous: RecallsSnapshot, mut current: RecallsSnapshot) -> Self {
        for record in previous.values_mut() {
            record.sort_ranges();
        }
        for record in current.values_mut() {
            record.sort_ranges();
        }
        Self { previous, current }
    }

    /// The current snapshot, reflecting any substitutions applied by
    /// [`find_modified_and_valid`](Self::find_modified_and_valid)
    pub fn current(&self) -> &RecallsSnapshot {
        &self.current
    }

    /// The previous snapshot as fetched from the store
    pub fn previous(&self) -> &RecallsSnapshot {
        &self.previous
    }

    /// Number of recalls in the previous snapshot
    pub fn previous_count(&self) -> usize {
        self.previous.len()
    }

    /// Find current records that are new or differ from their stored
    /// version, excluding records that fail validation.
    ///
    /// Invalid records never surface downstream: one with a stored
    /// counterpart is replaced by that counterpart in the current snapshot
    /// (so it reads as unchanged and is protected from deletion); one
    /// without is removed entirely (never existed). Substitutions and
    /// removals are collected during iteration and applied afterwards, so
    /// deletion detection and make/model extraction see the adjusted
    /// snapshot.
    pub fn find_modified_and_valid(&mut self) -> Vec<RecallRecord> {
        let mut modified = Vec::new();
        let mut substitutions = Vec::new();
        let mut removals = Vec::new();

        for (key, current) in &self.current {
            if !validator::is_valid(current) {
                match self.previous.get(key) {
                    Some(previous) => substitutions.push((key.clone(), previous.clone())),
                    None => removals.push(key.clone()),
                }
                continue;
            }

            match self.previous.get(key) {
                None => {
                    debug!(
                        "Detected a new make, model, recall number combination: '{}'",
                        current.make_model_recall_number
                    );
                    modified.push(current.clone());
                }
                Some(previous) if previous != current => {
                    debug!(
                        "Recall '{}' differs from its stored version",
                        current.make_model_recall_number
                    );
                    modified.push(current.clone());
                }
                Some(_) => {}
            }
        }

        if !substitutions.is_empty() || !removals.is_empty() {
            info!(
                "Invalid recall handling: {} replaced by stored version, {} dropped",
                substitutions.len(),
                removals.len()
            );
        }
        for (key, previous) in substitutions {
            self.current.insert(key, previous);
        }
        for key in removals {
            self.current.remove(&key);
        }

        modified
    }

    /// Find storage primary keys of recalls that disappeared from the
    /// current snapshot.
    ///
    /// A previous recall whose make and recall number are claimed by a
    /// missing-model row is still published by the source, so its deletion
    /// is suppressed regardless of model. The returned keys are the stored
    /// primary-key literals, not re-derived values.
    pub fn find_deleted_recall_keys(&self, missing_model: &[RecallRecord]) -> Vec<String> {
        let mut deleted = Vec::new();

        for (key, previous) in &self.previous {
            if self.current.contains_key(key) {
                continue;
            }

            let still_published = missing_model.iter().any(|record| {
                record.make == previous.make && record.recall_number == previous.recall_number
            });
            if still_published {
                debug!(
                    "Deletion of '{}' suppressed: recall number still published without a model",
                    previous.make_model_recall_number
                );
                continue;
            }

            deleted.push(previous.make_model_recall_number.clone());
        }

        deleted
    }
}
