use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::letters::{self, LETTERS};
use super::store::{KeyValueStore, StoreError};

/// Visit marker for one letter, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProgressRecord {
    pub visited: bool,
    /// ISO 8601 timestamp of the most recent visit.
    #[serde(rename = "lastVisit")]
    pub last_visit: String,
    pub completed: bool,
}

/// Glyph → record, serialized as one JSON object under the storage key.
pub type ProgressMap = BTreeMap<String, ProgressRecord>;

/// Number of distinct known letters with a record.
/// Keys that are not letters of the table are ignored.
pub fn visited_count(progress: &ProgressMap) -> usize {
    progress
        .keys()
        .filter(|key| {
            let mut chars = key.chars();
            matches!((chars.next(), chars.next()), (Some(c), None) if letters::is_valid(c))
        })
        .count()
}

/// `round(100 × visited / 28)`.
pub fn progress_percentage(progress: &ProgressMap) -> u32 {
    let visited = visited_count(progress) as f64;
    (visited * 100.0 / LETTERS.len() as f64).round() as u32
}

/// Reads and writes the progress map through a key-value store.
///
/// Reads fail open: missing, unreadable, or corrupt data is an empty map.
/// Write failures are logged and reported as `false`, never raised.
pub struct ProgressTracker<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ProgressTracker<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Load the map, surfacing why it could not be read.
    pub fn try_load(&self) -> Result<ProgressMap, StoreError> {
        match self.store.get(&self.key)? {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(ProgressMap::new()),
        }
    }

    /// Load the map, treating any failure as "no progress yet".
    pub fn load(&self) -> ProgressMap {
        self.try_load().unwrap_or_else(|err| {
            log::error!("error reading progress: {}", err);
            ProgressMap::new()
        })
    }

    /// Mark `glyph` visited and completed at `timestamp`.
    /// Re-visits only refresh the timestamp.
    pub fn record_visit(&mut self, glyph: char, timestamp: &str) -> bool {
        match self.try_record_visit(glyph, timestamp) {
            Ok(()) => true,
            Err(err) => {
                log::error!("error saving progress for {}: {}", glyph, err);
                false
            }
        }
    }

    fn try_record_visit(&mut self, glyph: char, timestamp: &str) -> Result<(), StoreError> {
        let mut progress = self.load();
        progress.insert(
            glyph.to_string(),
            ProgressRecord {
                visited: true,
                last_visit: timestamp.to_string(),
                completed: true,
            },
        );
        let raw = serde_json::to_string(&progress)?;
        self.store.set(&self.key, &raw)
    }

    pub fn percentage(&self) -> u32 {
        progress_percentage(&self.load())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::store::MemoryStore;

    const KEY: &str = "learningProgress";

    #[test]
    fn visit_is_persisted_as_json() {
        let mut tracker = ProgressTracker::new(MemoryStore::new(), KEY);
        assert!(tracker.record_visit('ب', "2024-01-01T00:00:00.000Z"));

        let raw = tracker.store().raw(KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(value["ب"]["visited"], true);
        assert_eq!(value["ب"]["completed"], true);
        assert_eq!(value["ب"]["lastVisit"], "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn repeat_visits_do_not_change_percentage() {
        let mut tracker = ProgressTracker::new(MemoryStore::new(), KEY);
        tracker.record_visit('ب', "t1");
        assert_eq!(tracker.percentage(), 4);
        tracker.record_visit('ب', "t2");
        assert_eq!(tracker.percentage(), 4);
        assert_eq!(tracker.load()["ب"].last_visit, "t2");

        tracker.record_visit('ت', "t3");
        assert_eq!(visited_count(&tracker.load()), 2);
        assert_eq!(tracker.percentage(), 7);
    }

    #[test]
    fn full_alphabet_is_one_hundred() {
        let mut tracker = ProgressTracker::new(MemoryStore::new(), KEY);
        for letter in &LETTERS {
            tracker.record_visit(letter.glyph, "t");
        }
        assert_eq!(tracker.percentage(), 100);
    }

    #[test]
    fn corrupt_data_reads_as_empty() {
        let store = MemoryStore::new().with_entry(KEY, "{not json");
        let tracker = ProgressTracker::new(store, KEY);
        assert!(tracker.try_load().is_err());
        assert!(tracker.load().is_empty());
        assert_eq!(tracker.percentage(), 0);
    }

    #[test]
    fn corrupt_data_is_overwritten_on_visit() {
        let store = MemoryStore::new().with_entry(KEY, "[1, 2]");
        let mut tracker = ProgressTracker::new(store, KEY);
        assert!(tracker.record_visit('ج', "t"));
        assert_eq!(tracker.load().len(), 1);
    }

    #[test]
    fn write_failure_is_swallowed() {
        let mut tracker = ProgressTracker::new(MemoryStore::read_only(), KEY);
        assert!(!tracker.record_visit('ب', "t"));
        assert_eq!(tracker.percentage(), 0);
    }

    #[test]
    fn unknown_keys_do_not_count() {
        let raw = r#"{"ب": {"visited": true, "lastVisit": "t", "completed": true},
                      "X":  {"visited": true, "lastVisit": "t", "completed": true},
                      "بب": {"visited": true}}"#;
        let tracker = ProgressTracker::new(MemoryStore::new().with_entry(KEY, raw), KEY);
        assert_eq!(tracker.load().len(), 3);
        assert_eq!(visited_count(&tracker.load()), 1);
    }
}
