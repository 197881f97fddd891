//! Dead-letter sink for failed sync items.
//!
//! Per-item failures never abort a run; they are recorded here and
//! inspected manually. Records are grouped into logical streams
//! (migration errors, recurring-sync errors, missing-product audits),
//! each stream a directory of numbered JSON array files capped at
//! [`RECORDS_PER_FILE`] records so a bad night stays greppable.
//!
//! The sink is a trait so an automated replayer can be slotted in later
//! without touching the pipelines.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Stream name for initial-migration failures.
pub const MIGRATE_ERRORS: &str = "migrate_errors";
/// Stream name for recurring-sync failures.
pub const SYNC_ERRORS: &str = "sync_errors";
/// Stream name for the missing-product audit.
pub const MISSING_PRODUCTS: &str = "missing_products";

/// Records per file before the sink rotates to the next index.
pub const RECORDS_PER_FILE: usize = 50;

/// Errors from the dead-letter sink.
#[derive(Debug, Error)]
pub enum DeadLetterError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An existing record file could not be parsed.
    #[error("Corrupt record file {path}: {source}")]
    Corrupt {
        path: String,
        source: serde_json::Error,
    },
}

/// One dead-lettered item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadLetterRecord {
    /// Identifier of the run that produced this record.
    pub run_id: Uuid,
    pub recorded_at: DateTime<Utc>,
    /// Store the failing item belongs to.
    pub store: String,
    /// Supplier SKU of the failing item, when the failure is item-scoped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Human-readable failure description.
    pub reason: String,
    /// Arbitrary context (the mutation input, user errors, ...).
    #[serde(default)]
    pub payload: Value,
}

impl DeadLetterRecord {
    /// A record stamped with the given run id and the current time.
    #[must_use]
    pub fn new(run_id: Uuid, store: &str, reason: String) -> Self {
        Self {
            run_id,
            recorded_at: Utc::now(),
            store: store.to_string(),
            sku: None,
            reason,
            payload: Value::Null,
        }
    }

    #[must_use]
    pub fn with_sku(mut self, sku: &str) -> Self {
        self.sku = Some(sku.to_string());
        self
    }

    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Destination for dead-lettered items.
pub trait DeadLetterSink: Send + Sync {
    /// Append one record to the named stream.
    ///
    /// # Errors
    ///
    /// Returns an error when the record cannot be persisted; callers log
    /// and continue, the record's loss must not fail the run twice.
    fn record(&self, stream: &str, record: &DeadLetterRecord) -> Result<(), DeadLetterError>;
}

/// File-backed sink: `{dir}/{stream}/{stream}_{index}.json`, each file a
/// JSON array of up to [`RECORDS_PER_FILE`] records.
pub struct FileSink {
    dir: PathBuf,
    // stream -> index of the file currently being filled
    indices: Mutex<HashMap<String, u32>>,
}

impl FileSink {
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            indices: Mutex::new(HashMap::new()),
        }
    }

    fn stream_path(&self, stream: &str, index: u32) -> PathBuf {
        self.dir.join(stream).join(format!("{stream}_{index}.json"))
    }

    /// Highest existing file index for a stream, scanning once per process.
    fn current_index(&self, stream: &str) -> u32 {
        let stream_dir = self.dir.join(stream);
        let prefix = format!("{stream}_");
        fs::read_dir(&stream_dir)
            .into_iter()
            .flatten()
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                name.strip_prefix(&prefix)?
                    .strip_suffix(".json")?
                    .parse::<u32>()
                    .ok()
            })
            .max()
            .unwrap_or(0)
    }

    fn load_records(path: &Path) -> Result<Vec<DeadLetterRecord>, DeadLetterError> {
        match fs::read(path) {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| DeadLetterError::Corrupt {
                    path: path.display().to_string(),
                    source,
                })
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(error) => Err(error.into()),
        }
    }
}

impl DeadLetterSink for FileSink {
    fn record(&self, stream: &str, record: &DeadLetterRecord) -> Result<(), DeadLetterError> {
        let mut indices = match self.indices.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let index = *indices
            .entry(stream.to_string())
            .or_insert_with(|| self.current_index(stream));

        fs::create_dir_all(self.dir.join(stream))?;

        let mut path = self.stream_path(stream, index);
        let mut records = Self::load_records(&path)?;
        if records.len() >= RECORDS_PER_FILE {
            let next = index + 1;
            indices.insert(stream.to_string(), next);
            path = self.stream_path(stream, next);
            records = Self::load_records(&path)?;
        }

        records.push(record.clone());
        let json =
            serde_json::to_vec_pretty(&records).map_err(|source| DeadLetterError::Corrupt {
                path: path.display().to_string(),
                source,
            })?;
        fs::write(&path, json)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("deadletter_test_{tag}_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_records_appended_to_stream_file() {
        let dir = temp_dir("append");
        let sink = FileSink::new(&dir);
        let run_id = Uuid::new_v4();

        for sku in ["A1", "A2"] {
            let record = DeadLetterRecord::new(run_id, "DIAMOND", "create failed".to_string())
                .with_sku(sku);
            sink.record(SYNC_ERRORS, &record).unwrap();
        }

        let records =
            FileSink::load_records(&dir.join(SYNC_ERRORS).join("sync_errors_0.json")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].sku.as_deref(), Some("A2"));
        assert_eq!(records[0].run_id, run_id);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_rotation_after_cap() {
        let dir = temp_dir("rotate");
        let sink = FileSink::new(&dir);
        let run_id = Uuid::new_v4();

        for i in 0..(RECORDS_PER_FILE + 1) {
            let record = DeadLetterRecord::new(run_id, "DIAMOND", format!("failure {i}"));
            sink.record(MIGRATE_ERRORS, &record).unwrap();
        }

        let stream_dir = dir.join(MIGRATE_ERRORS);
        let first =
            FileSink::load_records(&stream_dir.join("migrate_errors_0.json")).unwrap();
        let second =
            FileSink::load_records(&stream_dir.join("migrate_errors_1.json")).unwrap();
        assert_eq!(first.len(), RECORDS_PER_FILE);
        assert_eq!(second.len(), 1);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_streams_are_independent() {
        let dir = temp_dir("streams");
        let sink = FileSink::new(&dir);
        let record = DeadLetterRecord::new(Uuid::new_v4(), "DIAMOND", "missing".to_string());

        sink.record(MISSING_PRODUCTS, &record).unwrap();
        sink.record(SYNC_ERRORS, &record).unwrap();

        assert!(dir.join(MISSING_PRODUCTS).join("missing_products_0.json").exists());
        assert!(dir.join(SYNC_ERRORS).join("sync_errors_0.json").exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
