//! Tests for make/model extraction and diffing

use super::{missing_model_row, recall, snapshot};
use crate::app::models::{Category, MakeRecord, ModelRecord};
use crate::app::services::comparer::{
    extract_makes_from_recalls, extract_models_from_recalls, find_deleted_make_keys,
    find_deleted_model_keys, find_modified_makes, find_modified_models,
};

#[test]
fn test_extract_makes_groups_by_category() {
    let recalls = snapshot(vec![
        recall("TOYOTA", "COROLLA", "R/2015/001"),
        recall("HONDA", "ACCORD", "R/2015/002"),
        recall("HONDA", "CIVIC", "R/2015/003"),
        recall("OTHER EQUIPMENT", "Composite X", "RCOMP/2009/009"),
    ]);

    let makes = extract_makes_from_recalls(&recalls, &snapshot(vec![]), &[]);

    assert_eq!(makes.len(), 2);
    let vehicle = makes.get("vehicle").unwrap();
    assert_eq!(vehicle.category, Category::Vehicle);
    assert_eq!(vehicle.makes.len(), 2);
    assert!(vehicle.makes.contains("TOYOTA"));
    assert!(vehicle.makes.contains("HONDA"));

    let equipment = makes.get("equipment").unwrap();
    assert_eq!(equipment.makes.len(), 1);
    assert!(equipment.makes.contains("OTHER EQUIPMENT"));
}

#[test]
fn test_extract_models_groups_by_category_and_make() {
    let recalls = snapshot(vec![
        recall("TOYOTA", "COROLLA", "R/2015/001"),
        recall("HONDA", "ACCORD", "R/2015/002"),
        recall("HONDA", "CIVIC", "R/2015/003"),
        recall("HONDA", "CIVIC", "R/2015/004"),
    ]);

    let models = extract_models_from_recalls(&recalls, &snapshot(vec![]), &[]);

    assert_eq!(models.len(), 2);
    let toyota = models.get("vehicle-TOYOTA").unwrap();
    assert_eq!(toyota.models.len(), 1);
    assert!(toyota.models.contains("COROLLA"));

    let honda = models.get("vehicle-HONDA").unwrap();
    assert_eq!(honda.models.len(), 2);
    assert!(honda.models.contains("ACCORD"));
    assert!(honda.models.contains("CIVIC"));
}

#[test]
fn test_missing_model_rows_fold_in_stored_versions() {
    // the current snapshot lost the FORD recall's model, but its stored
    // version still vouches for make and model
    let previous = snapshot(vec![recall("FORD", "FOCUS", "R/2014/001")]);
    let current = snapshot(vec![recall("TOYOTA", "COROLLA", "R/2015/001")]);
    let missing = vec![missing_model_row("FORD", "R/2014/001")];

    let makes = extract_makes_from_recalls(&current, &previous, &missing);
    let vehicle = makes.get("vehicle").unwrap();
    assert!(vehicle.makes.contains("FORD"));
    assert!(vehicle.makes.contains("TOYOTA"));

    let models = extract_models_from_recalls(&current, &previous, &missing);
    assert!(models.get("vehicle-FORD").unwrap().models.contains("FOCUS"));
}

#[test]
fn test_modified_makes_detects_new_and_changed_sets() {
    let recalls = snapshot(vec![
        recall("TOYOTA", "COROLLA", "R/2015/001"),
        recall("OTHER EQUIPMENT", "Composite X", "RCOMP/2009/009"),
    ]);
    let current = extract_makes_from_recalls(&recalls, &snapshot(vec![]), &[]);

    // previous knows the vehicle category with the same set, equipment is new
    let mut previous = std::collections::BTreeMap::new();
    let mut vehicle = MakeRecord::new(Category::Vehicle);
    vehicle.makes.insert("TOYOTA".to_string());
    previous.insert("vehicle".to_string(), vehicle);

    let modified = find_modified_makes(&previous, &current);
    assert_eq!(modified.len(), 1);
    assert_eq!(modified[0].category, Category::Equipment);

    // growing the vehicle set makes it modified too
    let recalls = snapshot(vec![
        recall("TOYOTA", "COROLLA", "R/2015/001"),
        recall("BMW", "E90", "R/2016/002"),
    ]);
    let current = extract_makes_from_recalls(&recalls, &snapshot(vec![]), &[]);
    let modified = find_modified_makes(&previous, &current);
    assert_eq!(modified.len(), 1);
    assert!(modified[0].makes.contains("BMW"));
    assert!(modified[0].makes.contains("TOYOTA"));
}

#[test]
fn test_modified_models_ignores_identical_sets() {
    let recalls = snapshot(vec![recall("TOYOTA", "COROLLA", "R/2015/001")]);
    let current = extract_models_from_recalls(&recalls, &snapshot(vec![]), &[]);

    let mut previous = std::collections::BTreeMap::new();
    let mut toyota = ModelRecord::new("vehicle-TOYOTA");
    toyota.models.insert("COROLLA".to_string());
    previous.insert("vehicle-TOYOTA".to_string(), toyota);

    assert!(find_modified_models(&previous, &current).is_empty());
}

#[test]
fn test_deleted_make_and_model_keys() {
    let previous_recalls = snapshot(vec![
        recall("TOYOTA", "COROLLA", "R/2015/001"),
        recall("OTHER EQUIPMENT", "Composite X", "RCOMP/2009/009"),
    ]);
    let current_recalls = snapshot(vec![recall("TOYOTA", "COROLLA", "R/2015/001")]);

    let previous_makes = extract_makes_from_recalls(&previous_recalls, &snapshot(vec![]), &[]);
    let current_makes = extract_makes_from_recalls(&current_recalls, &snapshot(vec![]), &[]);
    assert_eq!(
        find_deleted_make_keys(&previous_makes, &current_makes),
        vec!["equipment".to_string()]
    );

    let previous_models = extract_models_from_recalls(&previous_recalls, &snapshot(vec![]), &[]);
    let current_models = extract_models_from_recalls(&current_recalls, &snapshot(vec![]), &[]);
    assert_eq!(
        find_deleted_model_keys(&previous_models, &current_models),
        vec!["equipment-OTHER EQUIPMENT".to_string()]
    );
}

#[test]
fn test_missing_model_context_prevents_spurious_deletions() {
    let previous_recalls = snapshot(vec![recall("FORD", "FOCUS", "R/2014/001")]);
    let current_recalls = snapshot(vec![]);
    let missing = vec![missing_model_row("FORD", "R/2014/001")];

    let previous_makes = extract_makes_from_recalls(&previous_recalls, &snapshot(vec![]), &[]);
    let current_makes = extract_makes_from_recalls(&current_recalls, &previous_recalls, &missing);

    assert!(find_deleted_make_keys(&previous_makes, &current_makes).is_empty());
}
