//! Reconciliation engine for recall snapshots
//!
//! Compares the freshly parsed dataset ("current") against the dataset
//! previously pushed to the recall store ("previous") and computes the
//! minimal change set: records to upsert and primary keys to delete, for
//! recalls and for the derived make/model lookup records.
//!
//! ## Architecture
//!
//! - [`recalls`] - Recall diffing, invalid-record substitution and
//!   deletion-key detection
//! - [`makes_models`] - Make/model extraction from recall snapshots and
//!   their modification/deletion detection

pub mod makes_models;
pub mod recalls;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use makes_models::{
    extract_makes_from_recalls, extract_models_from_recalls, find_deleted_make_keys,
    find_deleted_model_keys, find_modified_makes, find_modified_models,
};
pub use recalls::RecallComparer;
