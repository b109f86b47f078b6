//! Tests for the serving index


use chrono::{NaiveDate, TimeZone, Utc};
use std::collections::HashMap;

use crate::app::models::{SowRecord, StoredEntry, TrafficLight};

/// Build a record with the fields the index cares about
pub fn record(
    ear_tag: &str,
    ventil: i32,
    event_date: Option<NaiveDate>,
    traffic_light: TrafficLight,
) -> SowRecord {
    SowRecord {
        ear_tag: ear_tag.to_string(),
        ventil_number: ventil,
        event_date,
        pregnancy_status: None,
        health_status: None,
        days_since_event: 0,
        traffic_light,
        extra: HashMap::new(),
    }
}

/// Wrap records into stored entries with a fixed import stamp
pub fn entries(records: Vec<SowRecord>) -> Vec<StoredEntry> {
    let imported_at = Utc.with_ymd_and_hms(2025, 7, 23, 12, 0, 0).unwrap();
    records
        .into_iter()
        .map(|record| StoredEntry::new(record, imported_at, "test.csv".to_string()))
        .collect()
}

pub fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}
