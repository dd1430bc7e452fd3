//! Worker pool runs over a scripted lookup client and a temp directory.

mod support;

use std::cell::Cell;
use std::time::Duration;

use brewscrape_pipeline::{ArtifactWriter, Resolver, WorkerPool};
use serde_json::{json, Value};

use support::{record, FakeLookup, Reply};

fn pool(lookup: FakeLookup, dir: &std::path::Path, concurrency: usize) -> WorkerPool<FakeLookup> {
    WorkerPool::new(Resolver::new(lookup), ArtifactWriter::new(dir), concurrency)
}

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

#[tokio::test]
async fn empty_input_drains_immediately() {
    let tmp = tempfile::tempdir().unwrap();
    let pool = pool(FakeLookup::new(), tmp.path(), 3);
    let drained = Cell::new(0);

    let summary = pool
        .run(Vec::new(), |s| {
            drained.set(drained.get() + 1);
            assert_eq!(s.total, 0);
        })
        .await;

    assert_eq!(drained.get(), 1);
    assert_eq!(summary.total, 0);
    assert!(summary.outcomes.is_empty());
    assert!(pool.resolver().client().calls().is_empty());
}

#[tokio::test]
async fn golden_ale_scenario_writes_local_id_with_ref_id() {
    let tmp = tempfile::tempdir().unwrap();
    let lookup = FakeLookup::new()
        .search("Golden Ale Special", Reply::Miss)
        .search("Ale Special", Reply::Hit(json!({"url": "/beer/x/99/"})))
        .page(
            "/beer/x/99/",
            Reply::Hit(json!({"id": 99, "name": "Golden Ale Special", "abv": 5.2})),
        );
    let pool = pool(lookup, tmp.path(), 3);

    let summary = pool
        .run(vec![record(42, "Golden Ale (Special)")], |_| {})
        .await;

    assert_eq!(summary.succeeded, 1);
    let written = read_json(&tmp.path().join("42.json"));
    assert_eq!(
        written,
        json!({"id": 42, "refId": 99, "name": "Golden Ale Special", "abv": 5.2})
    );
}

#[tokio::test]
async fn failures_are_counted_and_do_not_stop_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    let lookup = FakeLookup::new()
        .direct(1, Reply::Hit(json!({"id": 1})))
        .direct(3, Reply::Hit(json!({"id": 3})));
    let pool = pool(lookup, tmp.path(), 2);
    let drained = Cell::new(0);

    let records = vec![
        record(1, "One"),
        record(2, "Nowhere To Be Found"),
        record(3, "Three"),
    ];
    let summary = pool
        .run(records, |s| {
            drained.set(drained.get() + 1);
            assert_eq!(s.outcomes.len(), 3);
        })
        .await;

    assert_eq!(drained.get(), 1);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);

    let failed: Vec<_> = summary.outcomes.iter().filter(|o| !o.success()).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].record_id, 2);
    assert_eq!(
        failed[0].error.as_deref(),
        Some("No data for Nowhere To Be Found (2)")
    );

    assert!(tmp.path().join("1.json").is_file());
    assert!(!tmp.path().join("2.json").exists());
    assert!(tmp.path().join("3.json").is_file());
}

#[tokio::test]
async fn write_failure_is_a_record_error() {
    let tmp = tempfile::tempdir().unwrap();
    let not_a_dir = tmp.path().join("file");
    std::fs::write(&not_a_dir, b"").unwrap();

    let lookup = FakeLookup::new().direct(5, Reply::Hit(json!({"id": 5})));
    let pool = pool(lookup, &not_a_dir, 1);

    let summary = pool.run(vec![record(5, "Five")], |_| {}).await;

    assert_eq!(summary.failed, 1);
    let error = summary.outcomes[0].error.as_deref().unwrap();
    assert!(error.starts_with("Failed to write"), "{error}");
}

#[tokio::test]
async fn concurrency_is_bounded() {
    let tmp = tempfile::tempdir().unwrap();
    let mut lookup = FakeLookup::new().with_delay(Duration::from_millis(20));
    for id in 1..=9 {
        lookup = lookup.direct(id, Reply::Hit(json!({"id": id})));
    }
    let pool = pool(lookup, tmp.path(), 3);

    let records = (1..=9).map(|id| record(id, "Beer")).collect();
    let summary = pool.run(records, |_| {}).await;

    assert_eq!(summary.succeeded, 9);
    assert_eq!(pool.resolver().client().max_in_flight(), 3);
    assert_eq!(pool.resolver().client().fetches_made().len(), 9);
}

#[tokio::test]
async fn zero_concurrency_is_raised_to_one() {
    let tmp = tempfile::tempdir().unwrap();
    let lookup = FakeLookup::new()
        .with_delay(Duration::from_millis(5))
        .direct(1, Reply::Hit(json!({"id": 1})))
        .direct(2, Reply::Hit(json!({"id": 2})));
    let pool = pool(lookup, tmp.path(), 0);

    assert_eq!(pool.concurrency(), 1);
    let summary = pool
        .run(vec![record(1, "A"), record(2, "B")], |_| {})
        .await;

    assert_eq!(summary.succeeded, 2);
    assert_eq!(pool.resolver().client().max_in_flight(), 1);
}
