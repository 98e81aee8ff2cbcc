//! Configuration management and validation.
//!
//! Provides the configuration structure consumed by the data-update
//! pipeline: backend endpoint, safety thresholds, archival destination
//! and source-file expectations. Loading (CLI flags, environment) lives
//! in the CLI layer; this module only holds and validates values.

use crate::constants::{
    DEFAULT_CALLER_NAME, DEFAULT_DELETE_THRESHOLD_PERCENT, DEFAULT_SOURCE_ENCODING,
    DEFAULT_SOURCE_KEY,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a data-update run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the recalls backend API
    pub backend_base_url: String,

    /// API key sent with every backend request, if the backend requires one
    pub backend_api_key: Option<String>,

    /// Maximum percentage of previously stored recalls a single run may
    /// delete before the run is aborted
    pub delete_threshold_percent: f64,

    /// Bucket receiving archived copies of processed source files
    pub assets_bucket: String,

    /// Encoding label of the source CSV export
    pub source_encoding: String,

    /// Object key the ingestion trigger expects; other keys are rejected
    pub source_key: String,

    /// Job identity sent in the caller-name correlation header
    pub caller_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_base_url: "http://localhost:3000".to_string(),
            backend_api_key: None,
            delete_threshold_percent: DEFAULT_DELETE_THRESHOLD_PERCENT,
            assets_bucket: "recalls-assets".to_string(),
            source_encoding: DEFAULT_SOURCE_ENCODING.to_string(),
            source_key: DEFAULT_SOURCE_KEY.to_string(),
            caller_name: DEFAULT_CALLER_NAME.to_string(),
        }
    }
}

impl Config {
    /// Create configuration with a custom backend base URL
    pub fn with_backend_base_url(mut self, url: impl Into<String>) -> Self {
        self.backend_base_url = url.into();
        self
    }

    /// Create configuration with a custom API key
    pub fn with_backend_api_key(mut self, key: impl Into<String>) -> Self {
        self.backend_api_key = Some(key.into());
        self
    }

    /// Create configuration with a custom delete threshold
    pub fn with_delete_threshold_percent(mut self, percent: f64) -> Self {
        self.delete_threshold_percent = percent;
        self
    }

    /// Create configuration with a custom assets bucket
    pub fn with_assets_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.assets_bucket = bucket.into();
        self
    }

    /// Create configuration with a custom source encoding label
    pub fn with_source_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.source_encoding = encoding.into();
        self
    }

    /// Create configuration with a custom expected source key
    pub fn with_source_key(mut self, key: impl Into<String>) -> Self {
        self.source_key = key.into();
        self
    }

    /// Create configuration with a custom caller name
    pub fn with_caller_name(mut self, name: impl Into<String>) -> Self {
        self.caller_name = name.into();
        self
    }

    /// Validate configuration values before a run
    pub fn validate(&self) -> Result<()> {
        if self.backend_base_url.trim().is_empty() {
            return Err(Error::configuration("backend base URL must not be empty"));
        }

        if !(0.0..=100.0).contains(&self.delete_threshold_percent) {
            return Err(Error::configuration(format!(
                "delete threshold must be between 0 and 100, got {}",
                self.delete_threshold_percent
            )));
        }

        if encoding_rs::Encoding::for_label(self.source_encoding.as_bytes()).is_none() {
            return Err(Error::configuration(format!(
                "unknown source encoding label '{}'",
                self.source_encoding
            )));
        }

        if self.source_key.trim().is_empty() {
            return Err(Error::configuration("source key must not be empty"));
        }

        Ok(())
    }
}
