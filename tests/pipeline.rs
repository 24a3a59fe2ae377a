//! End-to-end pipeline test: generate, serialize under a recording, dump,
//! upload, with both time and randomness fixed.

use jfr_shipper::testing::{FixedClock, MockObjectStore};
use jfr_shipper::{Config, FailurePolicy, Pipeline, ProfilerRegistry};
use tempfile::TempDir;

fn full_size_config(dir: &TempDir) -> Config {
    Config {
        bucket: "loadtest-bucket".to_string(),
        dump_path: dir.path().join("app.jfr"),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_full_pipeline_with_active_recording() {
    let dir = TempDir::new().unwrap();

    let registry = ProfilerRegistry::default();
    registry.start("app");
    registry.append("app", b"opaque jfr payload");

    let store = MockObjectStore::default();
    let clock = FixedClock::at("2024-06-01T09:30:00Z");
    let pipeline = Pipeline::with_clock(full_size_config(&dir), registry, store.clone(), clock);

    let summary = pipeline.run().await.unwrap();

    assert!(summary.fully_succeeded());

    // Default workload shape: 3000 orders x 5 lines.
    let workload = summary.workload.unwrap();
    assert!(workload.byte_length > 500_000);

    let puts = store.puts();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].bucket, "loadtest-bucket");
    assert_eq!(puts[0].key, "jfr/gson-2024-06-01T09-30-00.000Z.jfr");
    assert_eq!(puts[0].bytes, b"opaque jfr payload");

    // Local dump removed after upload.
    assert!(!dir.path().join("app.jfr").exists());
}

#[tokio::test]
async fn test_invocations_are_independent() {
    let dir = TempDir::new().unwrap();

    let registry = ProfilerRegistry::default();
    registry.start("app");
    registry.append("app", b"first capture");

    let store = MockObjectStore::default();
    let clock = FixedClock::at("2024-06-01T09:30:00Z");
    let pipeline = Pipeline::with_clock(
        full_size_config(&dir),
        registry.clone(),
        store.clone(),
        clock,
    )
    .with_policy(FailurePolicy::LogAndContinue);

    // First invocation consumes the active recording.
    let first = pipeline.run().await.unwrap();
    assert!(first.fully_succeeded());

    // The recording is stopped but still registered, so the second
    // invocation dumps it again; the host would normally restart it.
    let second = pipeline.run().await.unwrap();
    assert!(second.fully_succeeded());

    assert_eq!(store.puts().len(), 2);
}

#[tokio::test]
async fn test_silent_failure_shape_without_recording() {
    let dir = TempDir::new().unwrap();

    let pipeline = Pipeline::new(
        full_size_config(&dir),
        ProfilerRegistry::default(),
        MockObjectStore::default(),
    );

    // Under the default policy the run still "succeeds" from the caller's
    // point of view; the failures are only visible in the summary.
    let summary = pipeline.run().await.unwrap();
    assert!(summary.workload.is_some());
    assert!(summary.recording_error.is_some());
    assert!(summary.upload_error.is_some());
    assert!(summary.uploaded_key.is_none());
}
