//! Parser for the recalls CSV export
//!
//! This module turns the raw CSV export published by the source system into
//! the normalized recall snapshot consumed by the comparer. The export is
//! loosely structured: legacy text encoding, duplicate rows per recall that
//! carry additional VIN/build-date ranges, and rows with required fields
//! missing.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`decoder`] - Source byte decoding (the export is not UTF-8)
//! - [`date`] - Slash-format date normalization with an invalid sentinel
//! - [`parser`] - Row handling, required-field policy and merge-by-key
//! - [`stats`] - Parsing statistics and the parsed collection
//!
//! ## Usage
//!
//! ```rust
//! use recalls_processor::app::services::csv_parser::CsvRecallsParser;
//!
//! # fn example(bytes: &[u8]) -> recalls_processor::Result<()> {
//! let parser = CsvRecallsParser::from_bytes(bytes, "cp1252")?;
//! let collection = parser.parse()?;
//!
//! println!(
//!     "Parsed {} recalls from {} rows",
//!     collection.recalls.len(),
//!     collection.stats.total_rows
//! );
//! # Ok(())
//! # }
//! ```

pub mod date;
pub mod decoder;
pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use date::{parse_slash_date, slash_format_to_iso};
pub use decoder::decode;
pub use parser::CsvRecallsParser;
pub use stats::{ParseStats, RecallsCollection};
