//! FILENAME: core/persistence/tests/test_snapshot.rs
//! Snapshot round-trip and forward-compatibility tests.

use cube_engine::{
    CharterMetrics, FactCube, HrMetrics, Snapshot, Summary, SummaryOptions, TeleCube, TeleMetrics,
};
use persistence::{
    load_snapshot, save_snapshot, FileStore, KeyValueStore, MemoryStore, SNAPSHOT_KEY,
};

fn sample_snapshot() -> Snapshot {
    let mut charter = FactCube::new();
    charter.insert(
        "January",
        "philip.ngugi@little.africa",
        CharterMetrics {
            total_2025: 1_481_940.0,
            total_2026: 4_230_000.0,
            target_2026: 4_908_418.0,
            ..Default::default()
        },
    );
    charter.insert(
        "February",
        "carol.ngugi@little.africa",
        CharterMetrics {
            total_2025: 2_317_260.0,
            total_2026: 9_300_000.0,
            target_2026: 6_512_810.0,
            ..Default::default()
        },
    );
    charter.sort_primary_canonical();

    let mut hr = FactCube::new();
    hr.insert(
        "January",
        "Payroll System",
        HrMetrics {
            target_2026: 200_000.0,
            actual_2026: 2_300_005.0,
        },
    );

    let mut tele = TeleCube::new();
    tele.insert(
        "Week 3",
        TeleMetrics {
            busbuddy_booked: 12.0,
            busbuddy_attended: 8.0,
            taxi_booked: 4.0,
            taxi_closed: 1.0,
            ..Default::default()
        },
    );

    let summary = Summary::compute(&charter, &hr, &tele, &SummaryOptions::default());
    Snapshot {
        charter,
        hr,
        tele,
        summary,
    }
}

#[test]
fn test_memory_roundtrip_is_field_for_field() {
    let store = MemoryStore::new();
    let snapshot = sample_snapshot();

    save_snapshot(&store, &snapshot).unwrap();
    let loaded = load_snapshot(&store).unwrap().expect("snapshot present");

    assert_eq!(loaded, snapshot);
    assert_eq!(
        loaded.charter.grand_totals.total_2026,
        13_530_000.0
    );
    assert_eq!(loaded.tele.by_week["Week 3"].month, "January");
    assert_eq!(loaded.summary.associates.len(), 2);
}

#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    let snapshot = sample_snapshot();

    save_snapshot(&store, &snapshot).unwrap();
    let loaded = load_snapshot(&store).unwrap().expect("snapshot present");
    assert_eq!(loaded, snapshot);

    // Saving again overwrites; there is only ever one snapshot.
    save_snapshot(&store, &Snapshot::default()).unwrap();
    let replaced = load_snapshot(&store).unwrap().expect("snapshot present");
    assert!(replaced.is_empty());
}

#[test]
fn test_older_snapshot_without_tele_cube_defaults_to_empty() {
    let store = MemoryStore::new();
    let snapshot = sample_snapshot();

    // Simulate a snapshot written before the tele table existed.
    let mut value: serde_json::Value = serde_json::to_value(&snapshot).unwrap();
    value.as_object_mut().unwrap().remove("tele");
    store.set(SNAPSHOT_KEY, &value.to_string()).unwrap();

    let loaded = load_snapshot(&store).unwrap().expect("snapshot present");
    assert!(loaded.tele.is_empty());
    assert_eq!(loaded.charter, snapshot.charter);
    assert_eq!(loaded.hr, snapshot.hr);
}

#[test]
fn test_empty_object_snapshot_loads_with_all_defaults() {
    let store = MemoryStore::new();
    store.set(SNAPSHOT_KEY, "{}").unwrap();

    let loaded = load_snapshot(&store).unwrap().expect("snapshot present");
    assert!(loaded.is_empty());
    assert_eq!(loaded.summary, cube_engine::Summary::default());
}
