use std::sync::Arc;

use serde::{
    de::DeserializeOwned,
    Serialize,
};

use super::DurableStore;
use crate::{
    cache::CacheRecord,
    core::models::{
        ProgressRecord,
        StatisticsRecord,
    },
};

pub const CACHE_KEY: &str = "content_cache.json";
pub const PROGRESS_KEY: &str = "progress.json";
pub const STATS_KEY: &str = "statistics.json";

/// Typed layer over the durable store for the three independent records.
/// Every read degrades to the record's default on failure and every write
/// failure is logged and dropped; the engine never depends on persistence
/// succeeding.
#[derive(Clone)]
pub struct RecordStore {
    store: Arc<dyn DurableStore>,
}

impl RecordStore {
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self { store }
    }

    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.store.read(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    log::warn!("Discarding malformed {}: {}", key, e);
                    T::default()
                }
            },
            Ok(None) => T::default(),
            Err(e) => {
                log::warn!("Failed to read {}: {}. Using defaults.", key, e);
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string_pretty(value) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.store.write(key, &json) {
            log::warn!("Failed to write {}: {}", key, e);
        }
    }

    pub fn load_progress(&self) -> ProgressRecord {
        self.load(PROGRESS_KEY)
    }

    pub fn save_progress(&self, progress: &ProgressRecord) {
        self.save(PROGRESS_KEY, progress);
    }

    pub fn load_stats(&self) -> StatisticsRecord {
        self.load(STATS_KEY)
    }

    pub fn save_stats(&self, stats: &StatisticsRecord) {
        self.save(STATS_KEY, stats);
    }

    pub fn load_cache_record(&self) -> CacheRecord {
        self.load(CACHE_KEY)
    }

    pub fn save_cache_record(&self, record: &CacheRecord) {
        self.save(CACHE_KEY, record);
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{
        core::models::{
            Difficulty,
            WordStats,
        },
        persistence::MemoryStore,
        LexicardError,
    };

    struct BrokenStore;

    impl DurableStore for BrokenStore {
        fn read(&self, _key: &str) -> Result<Option<String>, LexicardError> {
            Err(LexicardError::Custom("store offline".to_string()))
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), LexicardError> {
            Err(LexicardError::Custom("store offline".to_string()))
        }
    }

    #[test]
    fn progress_defaults_when_absent() {
        let records = RecordStore::new(Arc::new(MemoryStore::default()));
        let progress = records.load_progress();
        assert_eq!(progress.current_word_index, 0);
        assert_eq!(progress.completed_words, 0);
    }

    #[test]
    fn progress_defaults_on_malformed_json() {
        let store = Arc::new(MemoryStore::default());
        store.write(PROGRESS_KEY, "{ not json").unwrap();

        let records = RecordStore::new(store);
        assert_eq!(records.load_progress().current_word_index, 0);
    }

    #[test]
    fn stats_round_trip() {
        let records = RecordStore::new(Arc::new(MemoryStore::default()));

        let mut stats = StatisticsRecord::new();
        stats.insert(
            "abate".to_string(),
            WordStats {
                attempts: 2,
                last_difficulty: Difficulty::Good,
                last_reviewed: Utc::now(),
            },
        );
        records.save_stats(&stats);

        assert_eq!(records.load_stats(), stats);
    }

    #[test]
    fn broken_store_degrades_to_defaults() {
        let records = RecordStore::new(Arc::new(BrokenStore));

        assert!(records.load_stats().is_empty());
        assert_eq!(records.load_progress().current_word_index, 0);

        // Writes are dropped silently.
        records.save_progress(&ProgressRecord::default());
    }
}
