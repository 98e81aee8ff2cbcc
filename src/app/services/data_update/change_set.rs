//! Change payloads computed by the compare stage

use crate::app::models::{MakeRecord, ModelRecord, RecallRecord};

/// Entities to upsert in one run, grouped by resource type
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    pub recalls: Vec<RecallRecord>,
    pub makes: Vec<MakeRecord>,
    pub models: Vec<ModelRecord>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.recalls.is_empty() && self.makes.is_empty() && self.models.is_empty()
    }
}

/// Storage primary keys to delete in one run, grouped by resource type
#[derive(Debug, Clone, Default)]
pub struct DeletionSet {
    pub recalls: Vec<String>,
    pub makes: Vec<String>,
    pub models: Vec<String>,
}

impl DeletionSet {
    pub fn is_empty(&self) -> bool {
        self.recalls.is_empty() && self.makes.is_empty() && self.models.is_empty()
    }
}
