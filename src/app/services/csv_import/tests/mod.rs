//! Tests for the csv_import service
//!
//! Covers the quote-aware line tokenizer, the field-level parsers, column
//! resolution with positional fallbacks, and whole-file reading.

pub mod column_map_tests;
pub mod line_parser_tests;
pub mod reader_tests;

use crate::config::ColumnConfig;

/// MusterPlan-shaped header row, cleaned
pub fn musterplan_headers() -> Vec<String> {
    [
        "Stichtag", "Abf.", "Wochen bis", "Sau-Nr.", "13.07.2025", "TK", "Bucht", "Bel.Datum",
        "TRT", "Gruppe", "Eber", "Wurf", "Umr.", "vorauss.", "Abferkelung",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Configuration used by most reader tests
pub fn test_config() -> ColumnConfig {
    ColumnConfig::musterplan()
}
