//! Persistent accuracy statistics
//!
//! Maintains:
//! - Cumulative answer totals and per-letter mistake tallies
//! - One JSON file on disk; absent or malformed data degrades to zeros
//! - Accuracy formatting for the summary line

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

/// Cumulative statistics, persisted across sessions.
///
/// `mistakes` is keyed by the lowercase letter of the note that was answered
/// incorrectly (the note shown, not the wrong guess).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    pub total: u64,
    pub correct: u64,
    #[serde(default)]
    pub mistakes: FxHashMap<char, u64>,
}

impl StatsRecord {
    /// Record a correctly answered note
    pub fn record_correct(&mut self) {
        self.total += 1;
        self.correct += 1;
    }

    /// Record a wrong answer for the note with this letter
    pub fn record_mistake(&mut self, letter: char) {
        self.total += 1;
        *self
            .mistakes
            .entry(letter.to_ascii_lowercase())
            .or_insert(0) += 1;
    }

    /// Accuracy as a display string: one decimal percentage, `0%` when
    /// nothing has been answered yet
    pub fn accuracy_display(&self) -> String {
        if self.total == 0 {
            "0%".to_string()
        } else {
            format!("{:.1}%", self.correct as f64 * 100.0 / self.total as f64)
        }
    }

    /// Most-missed letters, sorted by mistake count descending
    pub fn top_mistakes(&self, count: usize) -> Vec<(char, u64)> {
        let mut pairs: Vec<(char, u64)> = self.mistakes.iter().map(|(&c, &n)| (c, n)).collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        pairs.into_iter().take(count).collect()
    }
}

/// File-backed store for one `StatsRecord`
pub struct StatsStore {
    path: PathBuf,
    debug: bool,
}

impl StatsStore {
    pub fn new(path: impl Into<PathBuf>, debug: bool) -> Self {
        StatsStore {
            path: path.into(),
            debug,
        }
    }

    /// Load the persisted record. Missing file or undecodable contents fall
    /// back to the zero record; decode failures are reported only in debug
    /// mode.
    pub fn load(&self) -> StatsRecord {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return StatsRecord::default(),
        };
        match decode(&content) {
            Ok(record) => record,
            Err(e) => {
                if self.debug {
                    eprintln!("⚠ Could not parse {}: {} (starting fresh)", self.path.display(), e);
                }
                StatsRecord::default()
            }
        }
    }

    /// Overwrite the persisted record in one synchronous write
    pub fn save(&self, record: &StatsRecord) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(record)?)?;
        Ok(())
    }

    /// Clear persisted state and return the zero record
    pub fn reset(&self) -> Result<StatsRecord, Box<dyn Error>> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(StatsRecord::default())
    }
}

/// Decode a persisted record. Split out so the fallback policy in `load`
/// stays visible at the call site.
fn decode(content: &str) -> Result<StatsRecord, serde_json::Error> {
    serde_json::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> (StatsStore, PathBuf) {
        let path = dir.path().join("stats.json");
        (StatsStore::new(&path, false), path)
    }

    #[test]
    fn test_load_without_file_is_zero_record() {
        let dir = tempdir().unwrap();
        let (store, _) = store_in(&dir);
        let record = store.load();
        assert_eq!(record, StatsRecord::default());
        assert_eq!(record.total, 0);
        assert!(record.mistakes.is_empty());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let (store, _) = store_in(&dir);

        let mut record = StatsRecord::default();
        record.record_correct();
        record.record_correct();
        record.record_mistake('G');
        record.record_mistake('g');

        store.save(&record).unwrap();
        assert_eq!(store.load(), record);
        assert_eq!(store.load().mistakes.get(&'g'), Some(&2));
    }

    #[test]
    fn test_malformed_file_falls_back_to_zero() {
        let dir = tempdir().unwrap();
        let (store, path) = store_in(&dir);
        fs::write(&path, "{not json").unwrap();
        assert_eq!(store.load(), StatsRecord::default());
    }

    #[test]
    fn test_reset_clears_persisted_state() {
        let dir = tempdir().unwrap();
        let (store, _) = store_in(&dir);

        let mut record = StatsRecord::default();
        record.record_mistake('e');
        store.save(&record).unwrap();

        assert_eq!(store.reset().unwrap(), StatsRecord::default());
        assert_eq!(store.load(), StatsRecord::default());
        // Resetting again with no file present is fine
        assert!(store.reset().is_ok());
    }

    #[test]
    fn test_accuracy_display() {
        let mut record = StatsRecord::default();
        assert_eq!(record.accuracy_display(), "0%");

        record.total = 4;
        record.correct = 3;
        assert_eq!(record.accuracy_display(), "75.0%");

        record.total = 3;
        record.correct = 1;
        assert_eq!(record.accuracy_display(), "33.3%");
    }

    #[test]
    fn test_top_mistakes_sorted() {
        let mut record = StatsRecord::default();
        for _ in 0..3 {
            record.record_mistake('g');
        }
        record.record_mistake('a');
        record.record_mistake('e');

        let top = record.top_mistakes(2);
        assert_eq!(top[0], ('g', 3));
        assert_eq!(top[1], ('a', 1));
    }
}
