//! Serving index for per-ventil record lists
//!
//! A read-optimized view derived from the authoritative store: one map from
//! ventil number to its records and one map from ear tag to a record. The
//! index is always rebuilt wholesale after a store mutation and swapped in
//! as a unit, never patched in place, so readers cannot observe a partially
//! updated view.

use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::app::models::{SortOrder, SowRecord, StoredEntry};

#[cfg(test)]
pub mod tests;

/// Derived, query-optimized view over the current stored entries
#[derive(Debug, Clone, Default)]
pub struct VentilIndex {
    /// Records grouped by ventil number, in store order
    by_ventil: HashMap<i32, Vec<SowRecord>>,

    /// Record per ear tag; on collision the first entry in store order wins
    by_ear_tag: HashMap<String, SowRecord>,
}

impl VentilIndex {
    /// Build both maps fresh from the store's entries in one O(n) pass
    pub fn rebuild_from(entries: &[StoredEntry]) -> Self {
        let mut by_ventil: HashMap<i32, Vec<SowRecord>> = HashMap::new();
        let mut by_ear_tag: HashMap<String, SowRecord> = HashMap::new();

        for entry in entries {
            let record = &entry.record;
            by_ventil
                .entry(record.ventil_number)
                .or_default()
                .push(record.clone());

            if by_ear_tag.contains_key(&record.ear_tag) {
                warn!("duplicate ear tag in index: {}", record.ear_tag);
            } else {
                by_ear_tag.insert(record.ear_tag.clone(), record.clone());
            }
        }

        debug!(
            "index rebuilt: {} ventils, {} ear tags",
            by_ventil.len(),
            by_ear_tag.len()
        );

        Self {
            by_ventil,
            by_ear_tag,
        }
    }

    /// Records assigned to a ventil, sorted as requested
    pub fn records_for_ventil(&self, ventil_number: i32, sort: SortOrder) -> Vec<SowRecord> {
        let mut records = self
            .by_ventil
            .get(&ventil_number)
            .cloned()
            .unwrap_or_default();
        sort_records(&mut records, sort);
        records
    }

    /// Record with the given ear tag
    pub fn record_by_ear_tag(&self, ear_tag: &str) -> Option<&SowRecord> {
        self.by_ear_tag.get(ear_tag)
    }

    /// All ventil numbers with at least one record, ascending
    pub fn ventil_numbers(&self) -> Vec<i32> {
        let mut numbers: Vec<i32> = self.by_ventil.keys().copied().collect();
        numbers.sort_unstable();
        numbers
    }

    /// Number of distinct ventils in the index
    pub fn ventil_count(&self) -> usize {
        self.by_ventil.len()
    }

    /// Number of records across all ventils
    pub fn record_count(&self) -> usize {
        self.by_ventil.values().map(Vec::len).sum()
    }
}

/// Sort a record list in place.
///
/// Date orders place records without an event date last in both directions;
/// severity orders use the fixed enum ranking, not alphabetical order.
pub fn sort_records(records: &mut [SowRecord], sort: SortOrder) {
    match sort {
        SortOrder::EarTagAscending => records.sort_by(|a, b| a.ear_tag.cmp(&b.ear_tag)),
        SortOrder::EarTagDescending => records.sort_by(|a, b| b.ear_tag.cmp(&a.ear_tag)),
        SortOrder::EventDateOldest => records.sort_by(compare_dates_asc),
        SortOrder::EventDateNewest => records.sort_by(compare_dates_desc),
        SortOrder::SeverityDescending => {
            records.sort_by(|a, b| b.traffic_light.severity().cmp(&a.traffic_light.severity()))
        }
        SortOrder::SeverityAscending => {
            records.sort_by(|a, b| a.traffic_light.severity().cmp(&b.traffic_light.severity()))
        }
    }
}

fn compare_dates_asc(a: &SowRecord, b: &SowRecord) -> Ordering {
    match (a.event_date, b.event_date) {
        (Some(da), Some(db)) => da.cmp(&db),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_dates_desc(a: &SowRecord, b: &SowRecord) -> Ordering {
    match (a.event_date, b.event_date) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
