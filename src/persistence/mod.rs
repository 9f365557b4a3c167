use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
    sync::Mutex,
};

use serde::{
    de::DeserializeOwned,
    Serialize,
};

use crate::core::LexicardError;

pub mod records;

pub use records::RecordStore;

const APP_NAME: &str = "lexicard";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<(), LexicardError> {
    let file_path = get_data_file_path(filename);
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&file_path, json)?;
    log::debug!("Data saved to: {}", file_path.display());
    Ok(())
}

pub fn load_json<T: DeserializeOwned + Default>(filename: &str) -> Result<T, LexicardError> {
    let file_path = get_data_file_path(filename);

    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(&file_path)?;
    let data: T = serde_json::from_str(&json)?;
    log::debug!("Data loaded from: {}", file_path.display());
    Ok(data)
}

pub fn load_json_or_default<T: DeserializeOwned + Default>(filename: &str) -> T {
    match load_json::<T>(filename) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Failed to load {}: {}. Using defaults.", filename, e);
            T::default()
        }
    }
}

/// Key-value durable storage. Implementations must tolerate concurrent use;
/// callers treat every failure as absent data rather than propagating it.
pub trait DurableStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, LexicardError>;
    fn write(&self, key: &str, value: &str) -> Result<(), LexicardError>;
}

/// One file per key under a root directory, the platform app-data dir by
/// default.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new() -> Self {
        Self { root: get_app_data_dir() }
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DurableStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, LexicardError> {
        let path = self.root.join(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), LexicardError> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.root.join(key), value)?;
        Ok(())
    }
}

/// Process-local store for tests and for running with no persistence at all.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl DurableStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, LexicardError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), LexicardError> {
        self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_a_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::with_root(dir.path().to_path_buf());

        store.write("progress.json", "{\"a\":1}").unwrap();
        assert_eq!(store.read("progress.json").unwrap(), Some("{\"a\":1}".to_string()));
    }

    #[test]
    fn file_store_missing_key_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::with_root(dir.path().to_path_buf());

        assert_eq!(store.read("missing.json").unwrap(), None);
    }

    #[test]
    fn memory_store_round_trips_a_key() {
        let store = MemoryStore::default();
        assert_eq!(store.read("k").unwrap(), None);

        store.write("k", "v").unwrap();
        assert_eq!(store.read("k").unwrap(), Some("v".to_string()));
    }
}
