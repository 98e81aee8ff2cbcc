//! Staged data-update pipeline
//!
//! The processor owns the backend client, the object store and the run
//! configuration. State between runs lives entirely in the remote store;
//! a run either completes or fails, there is no mid-run resume.

use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::app::adapters::api_client::RecallsApi;
use crate::app::adapters::object_store::ObjectStore;
use crate::app::models::{
    MakeRecord, MakesSnapshot, ModelRecord, ModelsSnapshot, RecallRecord, RecallsSnapshot,
};
use crate::app::services::comparer::{
    self, RecallComparer, extract_makes_from_recalls, extract_models_from_recalls,
};
use crate::app::services::csv_parser::{CsvRecallsParser, RecallsCollection};
use crate::config::Config;
use crate::constants::archive_key;
use crate::{Error, Result};

use super::change_set::{ChangeSet, DeletionSet};
use super::stats::UpdateStats;

/// Orchestrates one data-update run end to end
#[derive(Debug)]
pub struct DataUpdateProcessor<A, S> {
    api: A,
    store: S,
    config: Config,
}

impl<A: RecallsApi, S: ObjectStore> DataUpdateProcessor<A, S> {
    pub fn new(api: A, store: S, config: Config) -> Self {
        Self { api, store, config }
    }

    /// Run the full pipeline for one source object.
    ///
    /// A key other than the configured source filename is rejected without
    /// any processing.
    pub async fn run(&self, source_bucket: &str, source_key: &str) -> Result<UpdateStats> {
        let started = Instant::now();

        if source_key != self.config.source_key {
            warn!(
                "Ignoring object '{}': only '{}' triggers processing",
                source_key, self.config.source_key
            );
            return Err(Error::unexpected_source_key(
                source_key,
                &self.config.source_key,
            ));
        }

        let mut stats = UpdateStats::default();

        let bytes = self.download(source_bucket, source_key).await?;
        let collection = self.parse(&bytes)?;
        stats.parse = collection.stats.clone();

        let (changes, deletions) = self.compare(&collection).await?;
        stats.modified_recalls = changes.recalls.len();
        stats.modified_makes = changes.makes.len();
        stats.modified_models = changes.models.len();
        stats.deleted_recalls = deletions.recalls.len();
        stats.deleted_makes = deletions.makes.len();
        stats.deleted_models = deletions.models.len();

        self.insert(&changes).await?;
        self.delete(&deletions).await?;
        self.archive(source_bucket, source_key).await?;
        stats.archived = true;

        stats.duration = started.elapsed();
        info!("Data update complete: {}", stats.summary());
        Ok(stats)
    }

    /// Stage 1: fetch the source CSV bytes
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        info!("Downloading CSV data from '{}/{}'", bucket, key);
        let bytes = self.store.get_object(bucket, key).await?;
        if bytes.is_empty() {
            error!("Downloaded CSV file is empty");
            return Err(Error::EmptyFile {
                key: key.to_string(),
            });
        }
        info!("Downloaded {} bytes", bytes.len());
        Ok(bytes)
    }

    /// Stage 2: decode, parse and merge the CSV data
    fn parse(&self, bytes: &[u8]) -> Result<RecallsCollection> {
        info!("Parsing the buffered CSV data");
        let parser = CsvRecallsParser::from_bytes(bytes, &self.config.source_encoding)?;
        let collection = parser.parse()?;
        if collection.recalls.is_empty() {
            error!("CSV data yielded no valid recall records");
            return Err(Error::NoValidRecords);
        }
        Ok(collection)
    }

    /// Stage 3: diff the parsed dataset against the stored snapshots.
    ///
    /// Without a previous recalls snapshot nothing can be diffed safely, so
    /// a failed recalls fetch degrades to empty change sets. Failed make or
    /// model fetches only skip that entity's detection. The delete-threshold
    /// circuit breaker runs here, before any destructive call is issued.
    async fn compare(&self, collection: &RecallsCollection) -> Result<(ChangeSet, DeletionSet)> {
        let previous_recalls = match self.api.get_all_recalls().await {
            Ok(recalls) => recalls,
            Err(e) => {
                warn!(
                    "Could not fetch previous recalls, skipping comparison: {}",
                    e
                );
                return Ok((ChangeSet::default(), DeletionSet::default()));
            }
        };

        let mut comparer = RecallComparer::new(
            to_recalls_snapshot(previous_recalls),
            collection.recalls.clone(),
        );

        let modified_recalls = comparer.find_modified_and_valid();
        let deleted_recall_keys = comparer.find_deleted_recall_keys(&collection.missing_model);
        self.enforce_delete_threshold(deleted_recall_keys.len(), comparer.previous_count())?;

        let (modified_makes, deleted_make_keys) = match self.api.get_all_makes().await {
            Ok(makes) => {
                let previous = to_makes_snapshot(makes);
                let current = extract_makes_from_recalls(
                    comparer.current(),
                    comparer.previous(),
                    &collection.missing_model,
                );
                (
                    comparer::find_modified_makes(&previous, &current),
                    comparer::find_deleted_make_keys(&previous, &current),
                )
            }
            Err(e) => {
                warn!("Could not fetch previous makes, skipping make updates: {}", e);
                (Vec::new(), Vec::new())
            }
        };

        let (modified_models, deleted_model_keys) = match self.api.get_all_models().await {
            Ok(models) => {
                let previous = to_models_snapshot(models);
                let current = extract_models_from_recalls(
                    comparer.current(),
                    comparer.previous(),
                    &collection.missing_model,
                );
                (
                    comparer::find_modified_models(&previous, &current),
                    comparer::find_deleted_model_keys(&previous, &current),
                )
            }
            Err(e) => {
                warn!(
                    "Could not fetch previous models, skipping model updates: {}",
                    e
                );
                (Vec::new(), Vec::new())
            }
        };

        Ok((
            ChangeSet {
                recalls: modified_recalls,
                makes: modified_makes,
                models: modified_models,
            },
            DeletionSet {
                recalls: deleted_recall_keys,
                makes: deleted_make_keys,
                models: deleted_model_keys,
            },
        ))
    }

    /// Abort the run when a suspicious share of stored recalls would vanish,
    /// typically caused by a truncated or malformed source file
    fn enforce_delete_threshold(&self, deleted: usize, previous: usize) -> Result<()> {
        if previous == 0 {
            return Ok(());
        }

        let percentage = (deleted as f64 / previous as f64) * 100.0;
        if percentage > self.config.delete_threshold_percent {
            error!(
                "Aborting: {} of {} stored recalls ({:.1}%) would be deleted, threshold is {}%",
                deleted, previous, percentage, self.config.delete_threshold_percent
            );
            return Err(Error::delete_threshold_exceeded(
                deleted,
                previous,
                self.config.delete_threshold_percent,
            ));
        }

        debug!(
            "Delete threshold check passed: {}/{} recalls ({:.1}%)",
            deleted, previous, percentage
        );
        Ok(())
    }

    /// Stage 4: upsert modified entities. All three resource types are
    /// attempted; any failure fails the stage afterwards.
    async fn insert(&self, changes: &ChangeSet) -> Result<()> {
        info!(
            "Upserting {} recalls, {} makes, {} models",
            changes.recalls.len(),
            changes.makes.len(),
            changes.models.len()
        );

        let mut failures = 0;
        if let Err(e) = self.api.update_recalls(&changes.recalls).await {
            error!("Updating recalls failed: {}", e);
            failures += 1;
        }
        if let Err(e) = self.api.update_makes(&changes.makes).await {
            error!("Updating makes failed: {}", e);
            failures += 1;
        }
        if let Err(e) = self.api.update_models(&changes.models).await {
            error!("Updating models failed: {}", e);
            failures += 1;
        }

        if failures > 0 {
            return Err(Error::api(
                "insert",
                format!("{} of 3 update requests failed", failures),
            ));
        }
        Ok(())
    }

    /// Stage 5: delete removed entities, same independent-attempt pattern
    async fn delete(&self, deletions: &DeletionSet) -> Result<()> {
        info!(
            "Deleting {} recalls, {} makes, {} models",
            deletions.recalls.len(),
            deletions.makes.len(),
            deletions.models.len()
        );

        let mut failures = 0;
        if let Err(e) = self.api.delete_recalls(&deletions.recalls).await {
            error!("Deleting recalls failed: {}", e);
            failures += 1;
        }
        if let Err(e) = self.api.delete_makes(&deletions.makes).await {
            error!("Deleting makes failed: {}", e);
            failures += 1;
        }
        if let Err(e) = self.api.delete_models(&deletions.models).await {
            error!("Deleting models failed: {}", e);
            failures += 1;
        }

        if failures > 0 {
            return Err(Error::api(
                "delete",
                format!("{} of 3 delete requests failed", failures),
            ));
        }
        Ok(())
    }

    /// Stage 6: archive the processed source file for audit retention
    async fn archive(&self, bucket: &str, key: &str) -> Result<()> {
        let destination = archive_key(key);
        info!(
            "Archiving '{}/{}' to '{}/{}'",
            bucket, key, self.config.assets_bucket, destination
        );
        self.store
            .copy_object(bucket, key, &self.config.assets_bucket, &destination)
            .await
    }
}

/// Key a fetched recall list into a snapshot, skipping records that lost
/// their natural key in storage
fn to_recalls_snapshot(records: Vec<RecallRecord>) -> RecallsSnapshot {
    let mut snapshot = RecallsSnapshot::new();
    for record in records {
        match record.key() {
            Some(key) => {
                snapshot.insert(key, record);
            }
            None => warn!(
                "Stored recall '{}' has no make or model, ignoring",
                record.make_model_recall_number
            ),
        }
    }
    snapshot
}

fn to_makes_snapshot(records: Vec<MakeRecord>) -> MakesSnapshot {
    records
        .into_iter()
        .map(|record| (record.key(), record))
        .collect()
}

fn to_models_snapshot(records: Vec<ModelRecord>) -> ModelsSnapshot {
    records
        .into_iter()
        .map(|record| (record.key(), record))
        .collect()
}
