//! Saving and restoring a plan under a well-known key.
//!
//! A key with nothing behind it means no plan has been made yet.
//! Stored text that no longer decodes as a [`Schedule`] is treated the same way,
//! so an older or damaged save never blocks making a new plan.

use crate::data::Schedule;
use rustc_hash::FxHashMap;
use std::{
    fs::{self, File},
    io::{BufWriter, ErrorKind, Write},
    path::PathBuf,
};
use thiserror::Error;
use tracing::{info, warn};

/// Error while reading or writing a saved plan.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Keys may only contain ASCII letters, digits, `-`, `_` and `.`.
    #[error("{0:?} cannot be used as a storage key")]
    InvalidKey(String),

    /// Error involving filesystem
    #[error("filesystem error")]
    Io(#[from] std::io::Error),

    /// The plan could not be encoded.
    #[error("could not encode plan")]
    Json(#[from] serde_json::Error),
}

/// Key-value storage for plans.
pub trait ScheduleStore {
    /// The plan saved under `key`, if there is a readable one.
    fn load(&self, key: &str) -> Result<Option<Schedule>, StoreError>;

    /// Save `schedule` under `key`, replacing whatever was there.
    fn save(&mut self, key: &str, schedule: &Schedule) -> Result<(), StoreError>;

    /// Forget the plan under `key`. Not an error if there was none.
    fn clear(&mut self, key: &str) -> Result<(), StoreError>;
}

fn check_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

fn decode(key: &str, text: &str) -> Option<Schedule> {
    serde_json::from_str(text)
        .inspect_err(|e| warn!(key, error = %e, "saved plan is unreadable, ignoring it"))
        .ok()
}

/// Keeps plans in memory as serialized text, the way a browser's local storage would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put raw text under `key`, bypassing encoding.
    pub fn insert_raw(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }
}

impl ScheduleStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Schedule>, StoreError> {
        check_key(key)?;
        Ok(self.entries.get(key).and_then(|text| decode(key, text)))
    }

    fn save(&mut self, key: &str, schedule: &Schedule) -> Result<(), StoreError> {
        check_key(key)?;
        let text = serde_json::to_string(schedule)?;
        self.entries.insert(key.to_string(), text);
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        check_key(key)?;
        self.entries.remove(key);
        Ok(())
    }
}

/// Keeps each plan in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store plans under `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        check_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl ScheduleStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<Schedule>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(decode(key, &text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, schedule: &Schedule) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        // write beside the target, then swap
        let partial = path.with_extension("json.partial");
        {
            let mut w = BufWriter::new(File::create(&partial)?);
            serde_json::to_writer_pretty(&mut w, schedule)?;
            w.flush()?;
        }
        fs::rename(&partial, &path)?;

        info!(path = %path.display(), days = schedule.len(), "saved plan");
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "cleared plan");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::{BlockId, BlockType, ClockTime, StudyBlock, SubjectId},
        date,
    };
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn sample() -> Schedule {
        let day = date!(2 / 14 / 2024);
        Schedule(BTreeMap::from_iter([
            (
                day,
                vec![StudyBlock {
                    id: BlockId(Uuid::from_u128(1)),
                    subject_id: SubjectId("dbms".to_string()),
                    subject_name: "Databases".to_string(),
                    date: day,
                    start_time: ClockTime::offset(14, 0),
                    duration_minutes: 75,
                    topic: Some("Normal Forms".to_string()),
                    kind: BlockType::Practice,
                    is_completed: false,
                }],
            ),
            (date!(2 / 15 / 2024), vec![]),
        ]))
    }

    fn exercise(store: &mut impl ScheduleStore) {
        assert!(store.load("plan").unwrap().is_none(), "nothing saved yet");

        store.save("plan", &sample()).unwrap();
        assert_eq!(store.load("plan").unwrap(), Some(sample()));
        assert!(store.load("other").unwrap().is_none(), "keys are separate");

        let mut replacement = sample();
        replacement.pop_last();
        store.save("plan", &replacement).unwrap();
        assert_eq!(store.load("plan").unwrap(), Some(replacement));

        store.clear("plan").unwrap();
        assert!(store.load("plan").unwrap().is_none());
        store.clear("plan").unwrap();
    }

    #[test]
    fn test_memory_store() {
        exercise(&mut MemoryStore::new());
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("plans"));
        exercise(&mut store);
    }

    #[test]
    fn test_file_store_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.save("study-plan", &sample()).unwrap();

        let text = fs::read_to_string(dir.path().join("study-plan.json")).unwrap();
        let value = serde_json::from_str::<serde_json::Value>(&text).unwrap();
        assert_eq!(value["2024-02-14"][0]["startTime"], "14:00");
        assert!(
            !dir.path().join("study-plan.json.partial").exists(),
            "no partial file is left behind"
        );
    }

    #[test]
    fn test_unreadable_data_means_no_plan() {
        let mut store = MemoryStore::new();
        store.insert_raw("plan", r#"{"slots": [[1, 2, 3]]}"#);
        assert!(store.load("plan").unwrap().is_none());
        store.insert_raw("plan", "not json at all");
        assert!(store.load("plan").unwrap().is_none());

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("plan.json"), "[1, 2").unwrap();
        assert!(FileStore::new(dir.path()).load("plan").unwrap().is_none());
    }

    #[test]
    fn test_bad_keys() {
        let mut store = MemoryStore::new();
        for key in ["", "../escape", "a/b", ".hidden", "sp ace"] {
            assert!(
                matches!(store.save(key, &sample()), Err(StoreError::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
        assert!(store.save("spring-2024_v1.0", &sample()).is_ok());
    }
}
