//! Dead-letter persistence across process restarts.
//!
//! The sink is rebuilt from scratch for every run; these tests verify a
//! fresh sink keeps appending where the previous one stopped instead of
//! overwriting earlier records.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::PathBuf;

use skubridge_sync::deadletter::{
    DeadLetterRecord, DeadLetterSink, FileSink, RECORDS_PER_FILE, SYNC_ERRORS,
};
use uuid::Uuid;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("skubridge_it_{tag}_{}", Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn read_records(path: &PathBuf) -> Vec<serde_json::Value> {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

#[test]
fn test_new_sink_continues_existing_stream() {
    let dir = temp_dir("restart");
    let run_one = Uuid::new_v4();

    {
        let sink = FileSink::new(&dir);
        let record = DeadLetterRecord::new(run_one, "DIAMOND", "create failed".to_string())
            .with_sku("DT-1");
        sink.record(SYNC_ERRORS, &record).unwrap();
    }

    // second run, second sink instance
    let sink = FileSink::new(&dir);
    let record = DeadLetterRecord::new(Uuid::new_v4(), "DIAMOND", "price failed".to_string())
        .with_sku("DT-2");
    sink.record(SYNC_ERRORS, &record).unwrap();

    let records = read_records(&dir.join(SYNC_ERRORS).join("sync_errors_0.json"));
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["sku"], "DT-1");
    assert_eq!(records[1]["sku"], "DT-2");
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_new_sink_resumes_at_highest_index() {
    let dir = temp_dir("resume");

    {
        let sink = FileSink::new(&dir);
        for i in 0..=RECORDS_PER_FILE {
            let record = DeadLetterRecord::new(Uuid::new_v4(), "DIAMOND", format!("failure {i}"));
            sink.record(SYNC_ERRORS, &record).unwrap();
        }
    }

    // the previous run rotated to file index 1 with one record in it
    let sink = FileSink::new(&dir);
    let record = DeadLetterRecord::new(Uuid::new_v4(), "DIAMOND", "late failure".to_string());
    sink.record(SYNC_ERRORS, &record).unwrap();

    let first = read_records(&dir.join(SYNC_ERRORS).join("sync_errors_0.json"));
    let second = read_records(&dir.join(SYNC_ERRORS).join("sync_errors_1.json"));
    assert_eq!(first.len(), RECORDS_PER_FILE);
    assert_eq!(second.len(), 2);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_record_shape_on_disk() {
    let dir = temp_dir("shape");
    let run_id = Uuid::new_v4();

    let sink = FileSink::new(&dir);
    let record = DeadLetterRecord::new(run_id, "DIAMOND", "variant update rejected".to_string())
        .with_sku("DT-9")
        .with_payload(serde_json::json!({ "field": ["price"], "message": "invalid" }));
    sink.record(SYNC_ERRORS, &record).unwrap();

    let records = read_records(&dir.join(SYNC_ERRORS).join("sync_errors_0.json"));
    let on_disk = &records[0];
    assert_eq!(on_disk["run_id"], run_id.to_string());
    assert_eq!(on_disk["store"], "DIAMOND");
    assert_eq!(on_disk["reason"], "variant update rejected");
    assert_eq!(on_disk["payload"]["field"][0], "price");
    assert!(on_disk["recorded_at"].is_string());
    fs::remove_dir_all(&dir).unwrap();
}
