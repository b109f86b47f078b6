//! Data models for sow-record import and serving
//!
//! This module contains the core data structures for representing imported
//! breeding-sow records, their persisted wrappers, and the import bookkeeping
//! types shared across the store and the serving index.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::constants::UNKNOWN_DATE_KEY;

// =============================================================================
// Traffic Light Classification
// =============================================================================

/// Derived urgency/health state of a record.
///
/// The numeric discriminants are part of the persisted format; severity
/// ranking for sorting is separate (see [`TrafficLight::severity`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrafficLight {
    /// Pregnant, below the yellow band
    Green,
    /// Approaching farrowing
    Yellow,
    /// Shortly before farrowing
    Red,
    /// Medication flagged, always takes precedence
    Purple,
    /// No usable event date and no medication flag
    Unknown,
}

impl TrafficLight {
    /// Fixed severity ranking: Purple > Red > Yellow > Green > Unknown.
    ///
    /// This is an enum ranking, not alphabetical and not the declaration
    /// order, so sorting must go through this accessor.
    pub fn severity(self) -> u8 {
        match self {
            TrafficLight::Purple => 4,
            TrafficLight::Red => 3,
            TrafficLight::Yellow => 2,
            TrafficLight::Green => 1,
            TrafficLight::Unknown => 0,
        }
    }

    /// Human-readable label for CLI output
    pub fn label(self) -> &'static str {
        match self {
            TrafficLight::Green => "green",
            TrafficLight::Yellow => "yellow",
            TrafficLight::Red => "red",
            TrafficLight::Purple => "purple",
            TrafficLight::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TrafficLight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Sow Record
// =============================================================================

/// One breeding-sow record as served to display surfaces.
///
/// Owned by the authoritative store; never mutated outside a merge or a
/// reclassification pass. `days_since_event` is recomputed whenever the
/// record is classified, not frozen at import time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SowRecord {
    /// Ear tag number, the natural identity of the animal
    pub ear_tag: String,

    /// Ventil / pen number the record is assigned to
    pub ventil_number: i32,

    /// Mating date, when present in the source row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,

    /// Raw pregnancy status text from the source row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pregnancy_status: Option<String>,

    /// Raw health status text, drives the medication flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_status: Option<String>,

    /// Days between the mating date and "now", truncated; negative when the
    /// date is missing
    pub days_since_event: i32,

    /// Derived classification
    pub traffic_light: TrafficLight,

    /// All remaining source columns keyed by cleaned header name
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, String>,
}

impl SowRecord {
    /// Deduplication key: ear tag plus event date (one mating = one record)
    pub fn unique_key(&self) -> String {
        match self.event_date {
            Some(date) => format!("{}_{}", self.ear_tag, date.format("%Y-%m-%d")),
            None => format!("{}_{}", self.ear_tag, UNKNOWN_DATE_KEY),
        }
    }
}

// =============================================================================
// Stored Entry
// =============================================================================

/// Persisted wrapper around a [`SowRecord`].
///
/// Invariant: at most one entry per `unique_key` exists in the store at any
/// time; re-importing the same key replaces the entry in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry {
    /// Composite deduplication key, `ear_tag + "_" + event_date`
    pub unique_key: String,

    /// The record payload
    pub record: SowRecord,

    /// When this entry was (last) imported; drives the retention sweep
    pub imported_at: DateTime<Utc>,

    /// File name of the export the entry came from
    pub source_file: String,
}

impl StoredEntry {
    /// Wrap a record for storage, stamping the key from the record itself
    pub fn new(record: SowRecord, imported_at: DateTime<Utc>, source_file: String) -> Self {
        Self {
            unique_key: record.unique_key(),
            record,
            imported_at,
            source_file,
        }
    }
}

// =============================================================================
// Import Bookkeeping
// =============================================================================

/// Append-only log entry for one completed import.
///
/// Independent lifecycle from [`StoredEntry`]: the retention sweep never
/// prunes history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportHistoryEntry {
    /// File name of the imported export
    pub source_file: String,

    /// When the import ran
    pub imported_at: DateTime<Utc>,

    /// Rows merged into the store (added + updated)
    pub record_count: usize,
}

/// Structured result of one import call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportResult {
    /// Rows that created a new stored entry
    pub added: usize,

    /// Rows that replaced an existing entry with the same key
    pub updated: usize,

    /// Rows rejected at row granularity (bad ventil, empty ear tag, too few
    /// columns)
    pub skipped: usize,
}

impl ImportResult {
    /// Rows that made it into the store
    pub fn merged(&self) -> usize {
        self.added + self.updated
    }
}

// =============================================================================
// Query Types
// =============================================================================

/// Sort orders for per-ventil record lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Ear tag, lexicographic ascending
    #[default]
    EarTagAscending,
    /// Ear tag, lexicographic descending
    EarTagDescending,
    /// Oldest mating date first; records without a date last
    EventDateOldest,
    /// Newest mating date first; records without a date last
    EventDateNewest,
    /// Most severe classification first (Purple > Red > Yellow > Green > Unknown)
    SeverityDescending,
    /// Least severe classification first
    SeverityAscending,
}

// =============================================================================
// Change Notification
// =============================================================================

/// Events emitted after every successful store mutation or derivation update
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// An import completed and the index was rebuilt
    Imported {
        source_file: String,
        result: ImportResult,
    },

    /// A retention sweep removed entries outside the window
    Swept { removed: usize },

    /// Thresholds changed and every stored record was reclassified
    ThresholdsChanged,

    /// Store and history were emptied
    Cleared,
}

/// Aggregate statistics over the current store content
#[derive(Debug, Clone, PartialEq)]
pub struct StoreStats {
    /// Number of stored entries
    pub total_records: usize,

    /// Number of distinct ventil numbers
    pub total_ventils: usize,

    /// Timestamp of the last persisted mutation, if any
    pub last_updated: Option<DateTime<Utc>>,

    /// Number of imports in the history log
    pub import_count: usize,
}
