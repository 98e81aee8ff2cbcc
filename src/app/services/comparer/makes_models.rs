//! Make and model lookup extraction and diffing
//!
//! The make and model records served to the frontend dropdowns are derived
//! entirely from the recall snapshot: one pass groups make names by category
//! and model names by category-make. Recalls published without a model (the
//! missing-model side list) still vouch for their make and recall number, so
//! the stored versions of those recalls are folded in as well; this prevents
//! a make or model from being deleted while its recall is still published.

use tracing::debug;

use crate::app::models::{
    MakeRecord, MakesSnapshot, ModelRecord, ModelsSnapshot, RecallRecord, RecallsSnapshot,
    category_make_key,
};

/// Group make names by recall category
pub fn extract_makes_from_recalls(
    recalls: &RecallsSnapshot,
    previous_recalls: &RecallsSnapshot,
    missing_model: &[RecallRecord],
) -> MakesSnapshot {
    let mut makes = MakesSnapshot::new();

    for recall in recalls.values().chain(stored_versions(previous_recalls, missing_model)) {
        if let Some(make) = &recall.make {
            makes
                .entry(recall.category.to_string())
                .or_insert_with(|| MakeRecord::new(recall.category))
                .makes
                .insert(make.clone());
        }
    }

    makes
}

/// Group model names by category and make
pub fn extract_models_from_recalls(
    recalls: &RecallsSnapshot,
    previous_recalls: &RecallsSnapshot,
    missing_model: &[RecallRecord],
) -> ModelsSnapshot {
    let mut models = ModelsSnapshot::new();

    for recall in recalls.values().chain(stored_versions(previous_recalls, missing_model)) {
        let (Some(make), Some(model)) = (&recall.make, &recall.model) else {
            continue;
        };
        let key = category_make_key(recall.category, make);
        models
            .entry(key.clone())
            .or_insert_with(|| ModelRecord::new(key))
            .models
            .insert(model.clone());
    }

    models
}

/// Stored versions of recalls referenced by missing-model rows
fn stored_versions<'a>(
    previous_recalls: &'a RecallsSnapshot,
    missing_model: &'a [RecallRecord],
) -> impl Iterator<Item = &'a RecallRecord> {
    previous_recalls.values().filter(|previous| {
        missing_model.iter().any(|record| {
            record.make == previous.make && record.recall_number == previous.recall_number
        })
    })
}

/// Find make records that are new or whose set of makes changed
pub fn find_modified_makes(previous: &MakesSnapshot, current: &MakesSnapshot) -> Vec<MakeRecord> {
    let mut modified = Vec::new();

    for (key, current_make) in current {
        match previous.get(key) {
            None => {
                debug!("Detected a new type of recall: '{}'", key);
                modified.push(current_make.clone());
            }
            Some(previous_make) if previous_make != current_make => {
                modified.push(current_make.clone());
            }
            Some(_) => {}
        }
    }

    modified
}

/// Find model records that are new or whose set of models changed
pub fn find_modified_models(
    previous: &ModelsSnapshot,
    current: &ModelsSnapshot,
) -> Vec<ModelRecord> {
    let mut modified = Vec::new();

    for (key, current_model) in current {
        match previous.get(key) {
            None => {
                debug!("Detected a new type and make combination: '{}'", key);
                modified.push(current_model.clone());
            }
            Some(previous_model) if previous_model != current_model => {
                modified.push(current_model.clone());
            }
            Some(_) => {}
        }
    }

    modified
}

/// Primary keys of make records that disappeared from the current snapshot
pub fn find_deleted_make_keys(previous: &MakesSnapshot, current: &MakesSnapshot) -> Vec<String> {
    previous
        .iter()
        .filter(|(key, _)| !current.contains_key(*key))
        .map(|(_, record)| record.key())
        .collect()
}

/// Primary keys of model records that disappeared from the current snapshot
pub fn find_deleted_model_keys(previous: &ModelsSnapshot, current: &ModelsSnapshot) -> Vec<String> {
    previous
        .iter()
        .filter(|(key, _)| !current.contains_key(*key))
        .map(|(_, record)| record.key())
        .collect()
}
