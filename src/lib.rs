//! Recalls Processor Library
//!
//! A Rust library for ingesting vehicle and equipment safety-recall CSV
//! exports and pushing incremental updates to the recalls backend store.
//!
//! This library provides tools for:
//! - Decoding and parsing the legacy-encoded recalls CSV export
//! - Merging duplicate rows into multi-range recall records
//! - Validating recall records against the business rules
//! - Diffing the parsed dataset against the previously stored snapshot
//! - Pushing paginated, chunked upserts and deletes to the backend API
//! - Archiving processed source files for audit retention

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod comparer;
        pub mod csv_parser;
        pub mod data_update;
        pub mod validator;
    }
    pub mod adapters {
        pub mod api_client;
        pub mod object_store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Category, DateValue, MakeRecord, ModelRecord, RecallKey, RecallRecord};
pub use config::Config;

/// Result type alias for the recalls processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for recall data-update operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error: {message}")]
    CsvParsing {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Source text could not be decoded with the configured encoding
    #[error("Decoding error ({encoding}): {message}")]
    Decode { encoding: String, message: String },

    /// Object storage operation failed
    #[error("Object store error for '{bucket}/{key}': {message}")]
    ObjectStore {
        bucket: String,
        key: String,
        message: String,
    },

    /// Downloaded source object exists but contains no data
    #[error("Downloaded CSV file '{key}' is empty")]
    EmptyFile { key: String },

    /// Parsing produced no usable recall records
    #[error("Parsed CSV data contains no valid recall records")]
    NoValidRecords,

    /// Backend API call failed (transport failure or 4xx/5xx response)
    #[error("API error during {operation}: {message}")]
    Api {
        operation: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Deletion circuit breaker tripped before any destructive call was made
    #[error(
        "Delete threshold exceeded: {deleted} of {previous} stored recalls \
         ({percentage:.1}%) would be deleted, threshold is {threshold_percent}%"
    )]
    DeleteThresholdExceeded {
        deleted: usize,
        previous: usize,
        percentage: f64,
        threshold_percent: f64,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Triggering object key does not match the expected source filename
    #[error("Unexpected source key '{key}', expected '{expected}' - file not processed")]
    UnexpectedSourceKey { key: String, expected: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a decoding error
    pub fn decode(encoding: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            encoding: encoding.into(),
            message: message.into(),
        }
    }

    /// Create an object store error
    pub fn object_store(
        bucket: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ObjectStore {
            bucket: bucket.into(),
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an API error without an underlying transport error
    pub fn api(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            operation: operation.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create an API error wrapping a transport failure
    pub fn api_transport(operation: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Api {
            operation: operation.into(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Create a delete-threshold error
    pub fn delete_threshold_exceeded(
        deleted: usize,
        previous: usize,
        threshold_percent: f64,
    ) -> Self {
        let percentage = if previous == 0 {
            0.0
        } else {
            (deleted as f64 / previous as f64) * 100.0
        };
        Self::DeleteThresholdExceeded {
            deleted,
            previous,
            percentage,
            threshold_percent,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an unexpected-source-key error
    pub fn unexpected_source_key(key: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::UnexpectedSourceKey {
            key: key.into(),
            expected: expected.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Api {
            operation: "request".to_string(),
            message: error.to_string(),
            source: Some(error),
        }
    }
}
