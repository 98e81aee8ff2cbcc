//! Data-update pipeline orchestration
//!
//! Sequences one complete run over a newly arrived CSV export:
//! download → parse → compare → insert → delete → archive. Each stage
//! receives the previous stage's output and the run aborts on the first
//! stage error; within the insert and delete stages the three entity types
//! (recalls, makes, models) are attempted independently.
//!
//! ## Architecture
//!
//! - [`processor`] - The staged pipeline and its safety gates
//! - [`change_set`] - Upsert and deletion payloads grouped per run
//! - [`stats`] - Run statistics for reporting

pub mod change_set;
pub mod processor;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use change_set::{ChangeSet, DeletionSet};
pub use processor::DataUpdateProcessor;
pub use stats::UpdateStats;
