//! Row merging for the authoritative store
//!
//! Turns tokenized export rows into stored entries and merges them into the
//! current entry list with per-key replacement. Row-level failures (bad
//! ventil number, empty ear tag, short rows) are counted as skipped and
//! never abort the file.

use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::app::models::{ImportResult, SowRecord, StoredEntry};
use crate::app::services::csv_import::field_parsers::{
    days_since_event, non_empty, parse_event_date, parse_ventil_number,
};
use crate::app::services::csv_import::{ParsedFile, ResolvedColumns, clean_value};
use crate::app::services::traffic_light::{Thresholds, classify};

/// Merge all rows of one parsed file into the entry list.
///
/// Each mergeable row either replaces the entry with the same unique key
/// (counted as updated) or appends a new one (counted as added). The caller
/// owns snapshotting and persistence; this function only mutates memory.
pub fn merge_rows(
    entries: &mut Vec<StoredEntry>,
    file: &ParsedFile,
    columns: &ResolvedColumns,
    thresholds: &Thresholds,
    now: DateTime<Utc>,
    progress: Option<&ProgressBar>,
) -> ImportResult {
    let mut result = ImportResult::default();

    // Key -> position lookup so replacement stays O(1) per row
    let mut positions: HashMap<String, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| (entry.unique_key.clone(), i))
        .collect();

    for (row_number, row) in file.rows.iter().enumerate() {
        if let Some(pb) = progress {
            pb.inc(1);
        }

        match build_record(row, file, columns, thresholds, now) {
            Some(record) => {
                let entry = StoredEntry::new(record, now, file.file_name.clone());
                match positions.get(&entry.unique_key) {
                    Some(&index) => {
                        entries[index] = entry;
                        result.updated += 1;
                    }
                    None => {
                        positions.insert(entry.unique_key.clone(), entries.len());
                        entries.push(entry);
                        result.added += 1;
                    }
                }
            }
            None => {
                debug!("skipping row {} of {}", row_number + 1, file.file_name);
                result.skipped += 1;
            }
        }
    }

    if result.skipped > 0 {
        warn!(
            "{}: {} rows skipped ({} merged)",
            file.file_name,
            result.skipped,
            result.merged()
        );
    }

    result
}

/// Build one record from a raw row, or `None` when the row is unusable
fn build_record(
    row: &[String],
    file: &ParsedFile,
    columns: &ResolvedColumns,
    thresholds: &Thresholds,
    now: DateTime<Utc>,
) -> Option<SowRecord> {
    if row.len() < columns.required_width() {
        return None;
    }

    let ventil_number = parse_ventil_number(&clean_value(&row[columns.ventil]))?;

    let ear_tag = clean_value(&row[columns.ear_tag]);
    if ear_tag.is_empty() {
        return None;
    }

    let event_date = columns
        .event_date
        .and_then(|index| row.get(index))
        .and_then(|raw| parse_event_date(&clean_value(raw)));
    let pregnancy_status = columns
        .pregnancy_status
        .and_then(|index| row.get(index))
        .and_then(|raw| non_empty(clean_value(raw)));
    let health_status = columns
        .health_status
        .and_then(|index| row.get(index))
        .and_then(|raw| non_empty(clean_value(raw)));

    let days = days_since_event(event_date, now);
    let traffic_light = classify(health_status.as_deref(), days, thresholds);

    // Every source column rides along for display surfaces
    let extra: HashMap<String, String> = file
        .headers
        .iter()
        .zip(row.iter())
        .map(|(header, value)| (header.clone(), clean_value(value)))
        .collect();

    Some(SowRecord {
        ear_tag,
        ventil_number,
        event_date,
        pregnancy_status,
        health_status,
        days_since_event: days,
        traffic_light,
        extra,
    })
}
