//! End-to-end integration tests: file on disk -> store -> serving queries

use chrono::{TimeZone, Utc};
use std::fs;
use std::path::{Path, PathBuf};

use stallplan::app::services::sow_store::SowStore;
use stallplan::app::services::traffic_light::Thresholds;
use stallplan::app::services::ventil_code::extract_ventil_number;
use stallplan::{ColumnConfig, SortOrder, TrafficLight};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 23, 12, 0, 0).unwrap()
}

fn write_export(dir: &Path, name: &str, rows: &[(&str, &str, &str)]) -> PathBuf {
    let mut content = String::from(
        "\"Stichtag\";\"Abf.\";\"Wochen bis\";\"Sau-Nr.\";\"23.07.2025\";\"TK\"\n",
    );
    for (ear_tag, ventil, date) in rows {
        content.push_str(&format!(
            "\" -3\";\"  {ear_tag}  \";\"+\";\"{ventil}   \";\"{date}\";\"134\"\n"
        ));
    }
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn import_then_query_per_ventil() {
    let dir = tempfile::tempdir().unwrap();
    let store = SowStore::open_at(&dir.path().join("data"), Thresholds::default(), now()).unwrap();
    let config = ColumnConfig::musterplan();

    let file = write_export(
        dir.path(),
        "plan.csv",
        &[("A", "1", "13.07.2025"), ("B", "1", "10.07.2025"), ("C", "2", "01.07.2025")],
    );
    let result = store.import_file_at(&file, &config, now(), None).unwrap();
    assert_eq!(result.added, 3);

    let ventil_one: Vec<String> = store
        .records_for_ventil(1, SortOrder::EarTagAscending)
        .into_iter()
        .map(|r| r.ear_tag)
        .collect();
    assert_eq!(ventil_one, vec!["A", "B"]);
    assert!(store.records_for_ventil(3, SortOrder::EarTagAscending).is_empty());
}

#[test]
fn detected_code_routes_to_the_same_records() {
    let dir = tempfile::tempdir().unwrap();
    let store = SowStore::open_at(&dir.path().join("data"), Thresholds::default(), now()).unwrap();
    let config = ColumnConfig::musterplan();

    let file = write_export(dir.path(), "plan.csv", &[("A", "42", "13.07.2025")]);
    store.import_file_at(&file, &config, now(), None).unwrap();

    // The code-detection collaborator hands over raw text
    let ventil = extract_ventil_number("VENTIL-042").unwrap();
    let records = store.records_for_ventil(ventil, SortOrder::SeverityDescending);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].ear_tag, "A");
}

#[test]
fn classification_follows_the_event_date_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let config = ColumnConfig::musterplan();
    let file = write_export(dir.path(), "plan.csv", &[("A", "1", "13.07.2025")]);

    {
        let store = SowStore::open_at(&data_dir, Thresholds::default(), now()).unwrap();
        store.import_file_at(&file, &config, now(), None).unwrap();
        let record = &store.records_for_ventil(1, SortOrder::EarTagAscending)[0];
        assert_eq!(record.days_since_event, 10);
        assert_eq!(record.traffic_light, TrafficLight::Green);
    }

    // Three months later the same stored record reads yellow
    let later = Utc.with_ymd_and_hms(2025, 10, 13, 12, 0, 0).unwrap();
    let store = SowStore::open_at(&data_dir, Thresholds::default(), later).unwrap();
    let record = &store.records_for_ventil(1, SortOrder::EarTagAscending)[0];
    assert_eq!(record.days_since_event, 92);
    assert_eq!(record.traffic_light, TrafficLight::Yellow);
}

#[test]
fn two_exports_merge_without_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let store = SowStore::open_at(&dir.path().join("data"), Thresholds::default(), now()).unwrap();
    let config = ColumnConfig::musterplan();

    let monday = write_export(
        dir.path(),
        "monday.csv",
        &[("A", "1", "13.07.2025"), ("B", "2", "10.07.2025")],
    );
    // Friday's export repeats A (moved to ventil 3) and adds C
    let friday = write_export(
        dir.path(),
        "friday.csv",
        &[("A", "3", "13.07.2025"), ("C", "2", "12.07.2025")],
    );

    store.import_file_at(&monday, &config, now(), None).unwrap();
    let result = store.import_file_at(&friday, &config, now(), None).unwrap();

    assert_eq!(result.added, 1);
    assert_eq!(result.updated, 1);
    assert_eq!(store.stats().total_records, 3);
    assert!(store.records_for_ventil(1, SortOrder::EarTagAscending).is_empty());
    assert_eq!(store.record_by_ear_tag("A").unwrap().ventil_number, 3);
    assert_eq!(store.history().len(), 2);
}
