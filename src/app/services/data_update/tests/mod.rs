//! Test fixtures and mock collaborators for data-update pipeline tests


use std::sync::{Arc, Mutex};

use crate::app::adapters::api_client::RecallsApi;
use crate::app::models::{DateValue, MakeRecord, ModelRecord, RecallRecord};
use crate::{Error, Result};
use chrono::NaiveDate;

/// Standard CSV header of the recalls export
pub fn csv_header() -> &'static str {
    "Launch Date,Recalls Number,Make,Concern,Defect,Remedy,Vehicle Numbers,Model,VIN Start,VIN End,Build Start,Build End"
}

/// A CSV data row matching [`stored_recall`] for the same identifiers
pub fn csv_row(make: &str, model: &str, recall_number: &str) -> String {
    format!(
        "15/01/2020,{},{},Concern,Defect,Remedy,100,{},,,,",
        recall_number, make, model
    )
}

/// Assemble CSV text from data rows
pub fn csv_text(rows: &[String]) -> String {
    let mut text = String::from(csv_header());
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text
}

/// The recall record [`csv_row`] parses into, as it would come back from
/// the store
pub fn stored_recall(make: &str, model: &str, recall_number: &str) -> RecallRecord {
    RecallRecord::new(
        Some(DateValue::Date(NaiveDate::from_ymd_opt(2020, 1, 15).unwrap())),
        recall_number.to_string(),
        Some(make.to_string()),
        Some("Concern".to_string()),
        Some("Defect".to_string()),
        Some("Remedy".to_string()),
        Some("100".to_string()),
        Some(model.to_string()),
        None,
        None,
        None,
        None,
    )
}

/// Everything the mock backend observed during a run
#[derive(Debug, Default)]
pub struct Recorded {
    pub updated_recalls: Vec<RecallRecord>,
    pub updated_makes: Vec<MakeRecord>,
    pub updated_models: Vec<ModelRecord>,
    pub deleted_recalls: Vec<String>,
    pub deleted_makes: Vec<String>,
    pub deleted_models: Vec<String>,
    pub update_attempts: Vec<&'static str>,
    pub delete_attempts: Vec<&'static str>,
}

/// In-memory stand-in for the recalls backend
#[derive(Debug, Clone)]
pub struct MockRecallsApi {
    /// Stored snapshots returned by the GET endpoints; `None` simulates a
    /// fetch failure
    pub previous_recalls: Option<Vec<RecallRecord>>,
    pub previous_makes: Option<Vec<MakeRecord>>,
    pub previous_models: Option<Vec<ModelRecord>>,

    pub fail_update_recalls: bool,
    pub fail_update_makes: bool,
    pub fail_update_models: bool,
    pub fail_delete_recalls: bool,
    pub fail_delete_makes: bool,
    pub fail_delete_models: bool,

    pub recorded: Arc<Mutex<Recorded>>,
}

impl Default for MockRecallsApi {
    fn default() -> Self {
        Self {
            previous_recalls: Some(Vec::new()),
            previous_makes: Some(Vec::new()),
            previous_models: Some(Vec::new()),
            fail_update_recalls: false,
            fail_update_makes: false,
            fail_update_models: false,
            fail_delete_recalls: false,
            fail_delete_makes: false,
            fail_delete_models: false,
            recorded: Arc::new(Mutex::new(Recorded::default())),
        }
    }
}

impl MockRecallsApi {
    pub fn with_previous_recalls(mut self, recalls: Vec<RecallRecord>) -> Self {
        self.previous_recalls = Some(recalls);
        self
    }

    fn fetch<T: Clone>(&self, snapshot: &Option<Vec<T>>, operation: &str) -> Result<Vec<T>> {
        snapshot
            .clone()
            .ok_or_else(|| Error::api(operation, "mock fetch failure"))
    }
}

impl RecallsApi for MockRecallsApi {
    async fn get_all_recalls(&self) -> Result<Vec<RecallRecord>> {
        self.fetch(&self.previous_recalls, "GET /recalls")
    }

    async fn get_all_makes(&self) -> Result<Vec<MakeRecord>> {
        self.fetch(&self.previous_makes, "GET /makes")
    }

    async fn get_all_models(&self) -> Result<Vec<ModelRecord>> {
        self.fetch(&self.previous_models, "GET /models")
    }

    async fn update_recalls(&self, recalls: &[RecallRecord]) -> Result<()> {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.update_attempts.push("recalls");
        if self.fail_update_recalls {
            return Err(Error::api("PATCH /recalls", "mock update failure"));
        }
        recorded.updated_recalls.extend_from_slice(recalls);
        Ok(())
    }

    async fn update_makes(&self, makes: &[MakeRecord]) -> Result<()> {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.update_attempts.push("makes");
        if self.fail_update_makes {
            return Err(Error::api("PATCH /makes", "mock update failure"));
        }
        recorded.updated_makes.extend_from_slice(makes);
        Ok(())
    }

    async fn update_models(&self, models: &[ModelRecord]) -> Result<()> {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.update_attempts.push("models");
        if self.fail_update_models {
            return Err(Error::api("PATCH /models", "mock update failure"));
        }
        recorded.updated_models.extend_from_slice(models);
        Ok(())
    }

    async fn delete_recalls(&self, keys: &[String]) -> Result<()> {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.delete_attempts.push("recalls");
        if self.fail_delete_recalls {
            return Err(Error::api("DELETE /recalls", "mock delete failure"));
        }
        recorded.deleted_recalls.extend_from_slice(keys);
        Ok(())
    }

    async fn delete_makes(&self, keys: &[String]) -> Result<()> {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.delete_attempts.push("makes");
        if self.fail_delete_makes {
            return Err(Error::api("DELETE /makes", "mock delete failure"));
        }
        recorded.deleted_makes.extend_from_slice(keys);
        Ok(())
    }

    async fn delete_models(&self, keys: &[String]) -> Result<()> {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.delete_attempts.push("models");
        if self.fail_delete_models {
            return Err(Error::api("DELETE /models", "mock delete failure"));
        }
        recorded.deleted_models.extend_from_slice(keys);
        Ok(())
    }
}
