//! Tests for the authoritative sow store
//!
//! Shared fixtures: a clock pinned to a fixed instant, a MusterPlan-shaped
//! export writer, and a default-config export writer with a health column.

pub mod store_tests;

use chrono::{DateTime, TimeZone, Utc};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ColumnConfig;

/// Fixed "now" used across store tests
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 23, 12, 0, 0).unwrap()
}

/// Write a MusterPlan-shaped export: ear tag at index 1, ventil at index 3,
/// mating date at index 4 under a dynamic date header
pub fn write_musterplan_export(dir: &Path, name: &str, rows: &[(&str, i32, &str)]) -> PathBuf {
    let mut content = String::from(
        "\"Stichtag\";\"Abf.\";\"Wochen bis\";\"Sau-Nr.\";\"23.07.2025\";\"TK\"\n",
    );
    for (ear_tag, ventil, date) in rows {
        content.push_str(&format!(
            "\" -3\";\"   {ear_tag}\";\"+\";\"{ventil}   \";\"{date}\";\"134\"\n"
        ));
    }
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Write an export matching the default configuration, including health and
/// pregnancy columns
pub fn write_default_export(
    dir: &Path,
    name: &str,
    rows: &[(&str, i32, &str, &str)],
) -> PathBuf {
    let mut content = String::from(
        "\"Ventilnummer\";\"Ohrmarkennummer\";\"Deckdatum\";\"Trächtigkeitsstatus\";\"Gesundheitszustand\"\n",
    );
    for (ear_tag, ventil, date, health) in rows {
        content.push_str(&format!(
            "\"{ventil}\";\"{ear_tag}\";\"{date}\";\"tragend\";\"{health}\"\n"
        ));
    }
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// MusterPlan configuration used by most store tests
pub fn musterplan_config() -> ColumnConfig {
    ColumnConfig::musterplan()
}

/// Default configuration with health/pregnancy roles mapped by name
pub fn default_config() -> ColumnConfig {
    ColumnConfig::default_config()
}
