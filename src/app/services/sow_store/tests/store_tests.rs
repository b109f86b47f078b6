//! Tests for store-level behavior: thresholds, clearing, notifications

use std::sync::{Arc, Mutex};

use super::{fixed_now, musterplan_config, write_musterplan_export};
use crate::app::models::{StoreEvent, TrafficLight};
use crate::app::services::sow_store::SowStore;
use crate::app::services::traffic_light::Thresholds;

fn open_store(dir: &std::path::Path) -> SowStore {
    SowStore::open_at(&dir.join("data"), Thresholds::default(), fixed_now()).unwrap()
}

#[test]
fn test_set_thresholds_reclassifies_whole_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path());
    // 13.07. against 23.07. is 10 days: green under the defaults
    let file = write_musterplan_export(dir.path(), "plan.csv", &[("601", 1, "13.07.2025")]);
    store
        .import_file_at(&file, &musterplan_config(), fixed_now(), None)
        .unwrap();
    assert_eq!(
        store.record_by_ear_tag("601").unwrap().traffic_light,
        TrafficLight::Green
    );

    let tight = Thresholds {
        green_min: 0,
        green_max: 4,
        yellow_min: 5,
        yellow_max: 9,
        red_min: 10,
    };
    store.set_thresholds_at(tight, fixed_now()).unwrap();

    assert_eq!(store.thresholds(), tight);
    assert_eq!(
        store.record_by_ear_tag("601").unwrap().traffic_light,
        TrafficLight::Red
    );
}

#[test]
fn test_clear_empties_store_and_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path());
    let file = write_musterplan_export(dir.path(), "plan.csv", &[("601", 1, "13.07.2025")]);
    store
        .import_file_at(&file, &musterplan_config(), fixed_now(), None)
        .unwrap();

    store.clear().unwrap();

    assert_eq!(store.stats().total_records, 0);
    assert!(store.history().is_empty());
    assert!(store.ventil_numbers().is_empty());
}

#[test]
fn test_import_emits_notification() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path());
    let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    store.subscribe(move |event| {
        if let StoreEvent::Imported { source_file, result } = event {
            sink.lock()
                .unwrap()
                .push(format!("{source_file}:{}", result.added));
        }
    });

    let file = write_musterplan_export(dir.path(), "plan.csv", &[("601", 1, "13.07.2025")]);
    store
        .import_file_at(&file, &musterplan_config(), fixed_now(), None)
        .unwrap();

    assert_eq!(events.lock().unwrap().as_slice(), ["plan.csv:1"]);
}

#[test]
fn test_failed_import_emits_no_notification() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path());
    let fired = Arc::new(Mutex::new(false));
    let sink = fired.clone();
    store.subscribe(move |_| *sink.lock().unwrap() = true);

    let _ = store.import_file_at(
        &dir.path().join("missing.csv"),
        &musterplan_config(),
        fixed_now(),
        None,
    );

    assert!(!*fired.lock().unwrap());
}

#[test]
fn test_threshold_change_emits_notification() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path());
    let fired = Arc::new(Mutex::new(false));
    let sink = fired.clone();
    store.subscribe(move |event| {
        if matches!(event, StoreEvent::ThresholdsChanged) {
            *sink.lock().unwrap() = true;
        }
    });

    store
        .set_thresholds_at(Thresholds::default(), fixed_now())
        .unwrap();
    assert!(*fired.lock().unwrap());
}

#[test]
fn test_store_returns_to_idle_after_import() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path());
    assert_eq!(store.import_phase(), crate::app::services::sow_store::ImportPhase::Idle);

    let file = write_musterplan_export(dir.path(), "plan.csv", &[("601", 1, "13.07.2025")]);
    store
        .import_file_at(&file, &musterplan_config(), fixed_now(), None)
        .unwrap();
    assert_eq!(store.import_phase(), crate::app::services::sow_store::ImportPhase::Idle);

    // A failed import also settles back to idle
    let _ = store.import_file_at(
        &dir.path().join("missing.csv"),
        &musterplan_config(),
        fixed_now(),
        None,
    );
    assert_eq!(store.import_phase(), crate::app::services::sow_store::ImportPhase::Idle);
}

#[test]
fn test_stats_reflect_content() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path());
    let file = write_musterplan_export(
        dir.path(),
        "plan.csv",
        &[("601", 1, "13.07.2025"), ("602", 1, "10.07.2025"), ("603", 2, "01.07.2025")],
    );
    store
        .import_file_at(&file, &musterplan_config(), fixed_now(), None)
        .unwrap();

    let stats = store.stats();
    assert_eq!(stats.total_records, 3);
    assert_eq!(stats.total_ventils, 2);
    assert_eq!(stats.import_count, 1);
    assert_eq!(stats.last_updated, Some(fixed_now()));
    assert_eq!(store.ventil_numbers(), vec![1, 2]);
}
