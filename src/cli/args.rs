//! Command-line argument definitions for the recalls processor
//!
//! This module defines the complete CLI interface using the clap derive
//! API. Values consumed by the pipeline configuration can also be supplied
//! through the environment, matching how the job is deployed.

use crate::config::Config;
use crate::constants::{
    DEFAULT_CALLER_NAME, DEFAULT_DELETE_THRESHOLD_PERCENT, DEFAULT_SOURCE_ENCODING,
    DEFAULT_SOURCE_KEY,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the recalls processor
///
/// Ingests vehicle and equipment safety-recall CSV exports and pushes
/// incremental updates to the recalls backend store.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "recalls-processor",
    version,
    about = "Ingest safety-recall CSV exports and push incremental updates to the recalls backend",
    long_about = "Processes the safety-recall CSV export published by the source system: decodes \
                  and parses the file, merges duplicate rows into multi-range recall records, \
                  diffs the dataset against the recall store and pushes the resulting upserts \
                  and deletions, with a configurable circuit breaker against mass deletion."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the recalls processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the full data-update pipeline for an uploaded CSV export
    Update(UpdateArgs),
    /// Parse and validate a local CSV export without touching the backend
    Check(CheckArgs),
}

/// Arguments for the update command (the main pipeline)
#[derive(Debug, Clone, Parser)]
pub struct UpdateArgs {
    /// Root directory of the object store; buckets are subdirectories
    #[arg(long = "store-root", value_name = "PATH", env = "OBJECT_STORE_ROOT")]
    pub store_root: PathBuf,

    /// Bucket the source CSV was uploaded to
    #[arg(
        long = "source-bucket",
        value_name = "BUCKET",
        env = "DATA_UPLOAD_BUCKET_NAME",
        default_value = "data-upload"
    )]
    pub source_bucket: String,

    /// Object key of the uploaded source CSV (the trigger)
    #[arg(long = "source-key", value_name = "KEY", default_value = DEFAULT_SOURCE_KEY)]
    pub source_key: String,

    /// Object key the pipeline expects; any other key is rejected
    #[arg(
        long = "expected-key",
        value_name = "KEY",
        env = "EXPECTED_SOURCE_KEY",
        default_value = DEFAULT_SOURCE_KEY
    )]
    pub expected_key: String,

    /// Base URL of the recalls backend API
    #[arg(long = "backend-url", value_name = "URL", env = "RECALLS_BACKEND_URL")]
    pub backend_url: String,

    /// API key for the recalls backend
    #[arg(long = "api-key", value_name = "KEY", env = "BACKEND_API_KEY")]
    pub api_key: Option<String>,

    /// Maximum percentage of stored recalls one run may delete
    #[arg(
        long = "delete-threshold",
        value_name = "PERCENT",
        env = "DELETE_THRESHOLD",
        default_value_t = DEFAULT_DELETE_THRESHOLD_PERCENT
    )]
    pub delete_threshold: f64,

    /// Bucket receiving archived copies of processed files
    #[arg(
        long = "assets-bucket",
        value_name = "BUCKET",
        env = "ASSETS_BUCKET_NAME",
        default_value = "recalls-assets"
    )]
    pub assets_bucket: String,

    /// Encoding label of the source CSV
    #[arg(long = "encoding", value_name = "LABEL", default_value = DEFAULT_SOURCE_ENCODING)]
    pub encoding: String,

    /// Job identity sent in the caller-name correlation header
    #[arg(
        long = "caller-name",
        value_name = "NAME",
        env = "JOB_NAME",
        default_value = DEFAULT_CALLER_NAME
    )]
    pub caller_name: String,

    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl UpdateArgs {
    /// Resolve the log level from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.quiet, self.verbose)
    }

    /// Build the pipeline configuration from these arguments
    pub fn to_config(&self) -> Config {
        let mut config = Config::default()
            .with_backend_base_url(&self.backend_url)
            .with_delete_threshold_percent(self.delete_threshold)
            .with_assets_bucket(&self.assets_bucket)
            .with_source_encoding(&self.encoding)
            .with_source_key(&self.expected_key)
            .with_caller_name(&self.caller_name);
        if let Some(key) = &self.api_key {
            config = config.with_backend_api_key(key);
        }
        config
    }
}

/// Arguments for the check command (local parse and validation report)
#[derive(Debug, Clone, Parser)]
pub struct CheckArgs {
    /// Path to the CSV export to check
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Encoding label of the source CSV
    #[arg(long = "encoding", value_name = "LABEL", default_value = DEFAULT_SOURCE_ENCODING)]
    pub encoding: String,

    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl CheckArgs {
    /// Resolve the log level from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.quiet, self.verbose)
    }
}

fn log_level(quiet: bool, verbose: u8) -> &'static str {
    if quiet {
        return "warn";
    }
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_args_build_a_valid_config() {
        let args = Args::parse_from([
            "recalls-processor",
            "update",
            "--store-root",
            "/tmp/store",
            "--backend-url",
            "https://recalls.example",
            "--delete-threshold",
            "30",
        ]);

        let Some(Commands::Update(update)) = args.command else {
            panic!("expected update subcommand");
        };
        let config = update.to_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend_base_url, "https://recalls.example");
        assert_eq!(config.delete_threshold_percent, 30.0);
        assert_eq!(config.source_key, DEFAULT_SOURCE_KEY);
    }

    #[test]
    fn test_verbosity_levels() {
        let args = Args::parse_from(["recalls-processor", "check", "file.csv", "-vv"]);
        let Some(Commands::Check(check)) = args.command else {
            panic!("expected check subcommand");
        };
        assert_eq!(check.get_log_level(), "trace");
    }
}
