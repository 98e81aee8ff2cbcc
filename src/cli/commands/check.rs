//! The check command: parse and validate a local CSV export
//!
//! Useful for inspecting a fresh export before it is uploaded: reports how
//! many rows parse, which records fail validation, and the make/model sets
//! the file would produce. Never contacts the backend.

use std::collections::BTreeMap;

use super::shared::setup_logging;
use crate::cli::args::CheckArgs;
use crate::app::services::comparer::{extract_makes_from_recalls, extract_models_from_recalls};
use crate::app::services::csv_parser::CsvRecallsParser;
use crate::app::services::validator;
use crate::{Error, Result};

/// Parse a local CSV export and print a validation report
pub async fn run_check(args: CheckArgs) -> Result<()> {
    setup_logging(args.get_log_level(), args.quiet)?;

    let bytes = std::fs::read(&args.input)
        .map_err(|e| Error::io(format!("failed to read {}", args.input.display()), e))?;

    let parser = CsvRecallsParser::from_bytes(&bytes, &args.encoding)?;
    let collection = parser.parse()?;

    let invalid: Vec<&str> = collection
        .recalls
        .values()
        .filter(|record| !validator::is_valid(record))
        .map(|record| record.make_model_recall_number.as_str())
        .collect();

    let empty = BTreeMap::new();
    let makes = extract_makes_from_recalls(&collection.recalls, &empty, &[]);
    let models = extract_models_from_recalls(&collection.recalls, &empty, &[]);

    println!("Checked {}", args.input.display());
    println!("  {}", collection.stats.summary());
    println!(
        "  {} unique recalls, {} valid, {} invalid",
        collection.recalls.len(),
        collection.recalls.len() - invalid.len(),
        invalid.len()
    );
    println!(
        "  {} make groups, {} category-make model groups",
        makes.len(),
        models.len()
    );

    if !invalid.is_empty() {
        println!("  Invalid recalls (would be skipped or replaced by stored versions):");
        for key in invalid {
            println!("    - {}", key);
        }
    }

    Ok(())
}
