//! Application constants for the recalls processor
//!
//! This module contains all configuration constants, default values,
//! and mappings used throughout the recalls processor application.

// =============================================================================
// CSV Source Columns
// =============================================================================

/// Column names in the recalls CSV export, as published by the source system
pub mod columns {
    pub const LAUNCH_DATE: &str = "Launch Date";
    pub const RECALLS_NUMBER: &str = "Recalls Number";
    pub const MAKE: &str = "Make";
    pub const CONCERN: &str = "Concern";
    pub const DEFECT: &str = "Defect";
    pub const REMEDY: &str = "Remedy";
    pub const VEHICLE_NUMBERS: &str = "Vehicle Numbers";
    pub const MODEL: &str = "Model";
    pub const VIN_START: &str = "VIN Start";
    pub const VIN_END: &str = "VIN End";
    pub const BUILD_START: &str = "Build Start";
    pub const BUILD_END: &str = "Build End";
}

/// Text encoding of the source CSV export (the file is not UTF-8)
pub const DEFAULT_SOURCE_ENCODING: &str = "cp1252";

// =============================================================================
// Recall Numbers and Product Groups
// =============================================================================

/// Product groups whose recalls are classified as vehicle recalls.
/// Any other group in the recall number classifies the recall as equipment.
pub const VEHICLE_PRODUCT_GROUPS: &[&str] = &["R", "RM", "RCT", "RPT", "RSPV", "RPC"];

/// Every product group accepted by the recall-number validation rule.
/// Superset of [`VEHICLE_PRODUCT_GROUPS`]: RCOMP and RTW are equipment
/// product groups, valid in a recall number but never classified as vehicle.
pub const VALID_PRODUCT_GROUPS: &[&str] =
    &["R", "RM", "RCOMP", "RCT", "RPT", "RSPV", "RTW", "RPC"];

/// Epoch added to two-digit recall-number and launch-date years.
/// Inherited from the source system: "98" means 1998, never 2098.
pub const TWO_DIGIT_YEAR_EPOCH: i32 = 1900;

/// Separator used when flattening composite keys for the storage schema
pub const KEY_SEPARATOR: char = '-';

// =============================================================================
// Backend API
// =============================================================================

/// Maximum number of entities submitted in a single PATCH request
pub const PATCH_PAGE_SIZE: usize = 500;

/// Correlation header carrying a per-request random identifier
pub const PARENT_REQUEST_ID_HEADER: &str = "x-parent-request-id";

/// Correlation header identifying the calling job
pub const CALLER_NAME_HEADER: &str = "x-caller-name";

/// API key header for the recalls backend
pub const API_KEY_HEADER: &str = "x-api-key";

/// Number of random bytes in a generated request identifier (hex-encoded)
pub const REQUEST_ID_BYTES: usize = 20;

/// Query parameter carrying the pagination continuation token
pub const EXCLUSIVE_START_KEY_PARAM: &str = "exclusiveStartKey";

// =============================================================================
// Data Update Defaults
// =============================================================================

/// Default maximum percentage of stored recalls that one run may delete
pub const DEFAULT_DELETE_THRESHOLD_PERCENT: f64 = 20.0;

/// Default object key the ingestion trigger expects
pub const DEFAULT_SOURCE_KEY: &str = "RecallsFile.csv";

/// Default job identity sent in the caller-name header
pub const DEFAULT_CALLER_NAME: &str = "recalls-data-update";

/// Prefix under which processed CSV files are archived in the assets bucket
pub const DOCUMENTS_PREFIX: &str = "documents";

/// Wire rendering of a recall date that could not be parsed
pub const DATE_INVALID: &str = "invalid";

/// Date format used in the storage schema
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Helper Functions
// =============================================================================

/// Extract the product group from a recall number (the token before the first '/')
pub fn product_group(recall_number: &str) -> &str {
    recall_number.split('/').next().unwrap_or(recall_number)
}

/// Check whether a recall number belongs to a vehicle product group
pub fn is_vehicle_product_group(recall_number: &str) -> bool {
    VEHICLE_PRODUCT_GROUPS.contains(&product_group(recall_number))
}

/// Build the archive key for a processed source file
pub fn archive_key(source_key: &str) -> String {
    format!("{}/{}", DOCUMENTS_PREFIX, source_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_group_extraction() {
        assert_eq!(product_group("R/2020/001"), "R");
        assert_eq!(product_group("RCOMP/2009/009"), "RCOMP");
        assert_eq!(product_group("no-slashes"), "no-slashes");
    }

    #[test]
    fn test_vehicle_product_groups() {
        assert!(is_vehicle_product_group("R/2020/001"));
        assert!(is_vehicle_product_group("RM/2015/12"));
        assert!(!is_vehicle_product_group("RCOMP/2009/009"));
        assert!(!is_vehicle_product_group("RTW/2011/03"));
    }

    #[test]
    fn test_validator_groups_are_superset_of_vehicle_groups() {
        for group in VEHICLE_PRODUCT_GROUPS {
            assert!(
                VALID_PRODUCT_GROUPS.contains(group),
                "vehicle group {} missing from validator allow-list",
                group
            );
        }
    }

    #[test]
    fn test_archive_key() {
        assert_eq!(archive_key("RecallsFile.csv"), "documents/RecallsFile.csv");
    }
}
