use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::models::FlashcardContent,
    persistence::RecordStore,
};

/// Bumped whenever `FlashcardContent`'s shape changes. Stored records with
/// any other version are invisible; there is no migration.
pub const CACHE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheRecord {
    pub version: u32,
    #[serde(default)]
    pub cards: HashMap<String, FlashcardContent>,
}

impl Default for CacheRecord {
    fn default() -> Self {
        Self { version: CACHE_VERSION, cards: HashMap::new() }
    }
}

/// Word-keyed store of previously generated cards. Best-effort only: reads
/// degrade to a miss and writes are logged and dropped on failure.
#[derive(Clone)]
pub struct ContentCache {
    records: RecordStore,
}

impl ContentCache {
    pub fn new(records: RecordStore) -> Self {
        Self { records }
    }

    pub fn get(&self, word: &str) -> Option<FlashcardContent> {
        let record = self.records.load_cache_record();
        if record.version != CACHE_VERSION {
            log::debug!(
                "Cache version {} does not match {}, treating as empty",
                record.version,
                CACHE_VERSION
            );
            return None;
        }
        record.cards.get(word).cloned()
    }

    /// Re-reads the stored record before merging so an entry written by a
    /// concurrent prefetch is not clobbered.
    pub fn put(&self, word: &str, content: &FlashcardContent) {
        let mut record = self.records.load_cache_record();
        if record.version != CACHE_VERSION {
            record = CacheRecord::default();
        }
        record.cards.insert(word.to_string(), content.clone());
        self.records.save_cache_record(&record);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        persistence::{
            records::CACHE_KEY,
            DurableStore,
            MemoryStore,
        },
        LexicardError,
    };

    fn sample_content(word: &str) -> FlashcardContent {
        FlashcardContent {
            word: word.to_string(),
            ipa: format!("/{}/", word),
            english_definition: format!("definition of {}", word),
            english_synonyms: vec!["synonym".to_string()],
            english_antonyms: Vec::new(),
            english_examples: vec![format!("An example with {}.", word)],
            persian_translation: "ترجمه".to_string(),
            persian_phonetic: "tarjome".to_string(),
            persian_synonyms: Vec::new(),
            persian_antonyms: Vec::new(),
            persian_examples: Vec::new(),
            extra_note: None,
        }
    }

    fn cache_over(store: Arc<MemoryStore>) -> ContentCache {
        ContentCache::new(RecordStore::new(store))
    }

    #[test]
    fn put_then_get_round_trips() {
        let cache = cache_over(Arc::new(MemoryStore::default()));
        let content = sample_content("abate");

        cache.put("abate", &content);
        assert_eq!(cache.get("abate"), Some(content));
        assert_eq!(cache.get("brook"), None);
    }

    #[test]
    fn put_is_idempotent() {
        let store = Arc::new(MemoryStore::default());
        let cache = cache_over(store.clone());
        let content = sample_content("abate");

        cache.put("abate", &content);
        let first = store.read(CACHE_KEY).unwrap();
        cache.put("abate", &content);
        let second = store.read(CACHE_KEY).unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.get("abate"), Some(content));
    }

    #[test]
    fn put_preserves_existing_entries() {
        let cache = cache_over(Arc::new(MemoryStore::default()));

        cache.put("abate", &sample_content("abate"));
        cache.put("brook", &sample_content("brook"));

        assert!(cache.get("abate").is_some());
        assert!(cache.get("brook").is_some());
    }

    #[test]
    fn version_mismatch_reads_as_empty() {
        let store = Arc::new(MemoryStore::default());
        let record = CacheRecord {
            version: CACHE_VERSION + 1,
            cards: HashMap::from([("abate".to_string(), sample_content("abate"))]),
        };
        store.write(CACHE_KEY, &serde_json::to_string(&record).unwrap()).unwrap();

        let cache = cache_over(store);
        assert_eq!(cache.get("abate"), None);
    }

    #[test]
    fn put_discards_entries_with_stale_version() {
        let store = Arc::new(MemoryStore::default());
        let record = CacheRecord {
            version: CACHE_VERSION + 1,
            cards: HashMap::from([("abate".to_string(), sample_content("abate"))]),
        };
        store.write(CACHE_KEY, &serde_json::to_string(&record).unwrap()).unwrap();

        let cache = cache_over(store.clone());
        cache.put("brook", &sample_content("brook"));

        assert_eq!(cache.get("abate"), None);
        assert!(cache.get("brook").is_some());

        let raw = store.read(CACHE_KEY).unwrap().unwrap();
        let stored: CacheRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.version, CACHE_VERSION);
    }

    #[test]
    fn corrupt_record_reads_as_empty() {
        let store = Arc::new(MemoryStore::default());
        store.write(CACHE_KEY, "{ definitely not a cache record").unwrap();

        let cache = cache_over(store);
        assert_eq!(cache.get("abate"), None);
    }

    #[test]
    fn failing_store_degrades_to_miss() {
        struct BrokenStore;

        impl DurableStore for BrokenStore {
            fn read(&self, _key: &str) -> Result<Option<String>, LexicardError> {
                Err(LexicardError::Custom("store offline".to_string()))
            }

            fn write(&self, _key: &str, _value: &str) -> Result<(), LexicardError> {
                Err(LexicardError::Custom("store offline".to_string()))
            }
        }

        let cache = ContentCache::new(RecordStore::new(Arc::new(BrokenStore)));
        assert_eq!(cache.get("abate"), None);
        cache.put("abate", &sample_content("abate"));
    }
}
