//! Test fixtures shared across CSV parser test modules

// Test modules
mod date_tests;
mod decoder_tests;

/// Header row of the recalls export in its published column order
pub fn standard_header() -> &'static str {
    "Launch Date,Recalls Number,Make,Concern,Defect,Remedy,Vehicle Numbers,Model,VIN Start,VIN End,Build Start,Build End"
}

/// Build CSV text from the standard header and the given data rows
pub fn csv_with_rows(rows: &[&str]) -> String {
    let mut text = String::from(standard_header());
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text
}
