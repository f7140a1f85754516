use crate::error::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// String slots addressed by key, the same shape as browser local storage
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// One `<key>.json` file per key inside a directory
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            debug!(key = %key, "Store miss (file does not exist)");
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, value)?;
        std::fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// A JSON-serialized list living under one key of a [`KeyValueStore`]
pub struct PersistentList<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PersistentList<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored list, or `initial` when nothing is stored.
    ///
    /// A stored value that does not parse is moved aside to `<key>_corrupt` and
    /// `initial` is returned instead.
    pub fn load(&self, initial: Vec<T>) -> Result<Vec<T>, StoreError> {
        let raw = match self.store.get(&self.key)? {
            Some(raw) => raw,
            None => return Ok(initial),
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => {
                info!(key = %self.key, count = items.len(), "Loaded stored list");
                Ok(items)
            }
            Err(e) => {
                let backup_key = format!("{}_corrupt", self.key);
                if let Err(backup_err) = self.store.set(&backup_key, &raw) {
                    warn!(
                        "Stored list '{}' is unreadable ({}) and could not be backed up: {}. Starting from the initial value.",
                        self.key, e, backup_err
                    );
                } else {
                    warn!(
                        "Stored list '{}' is unreadable ({}). Backed it up to '{}' and starting from the initial value.",
                        self.key, e, backup_key
                    );
                }
                Ok(initial)
            }
        }
    }

    pub fn save(&self, items: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(items)?;
        self.store.set(&self.key, &json)?;
        debug!(key = %self.key, count = items.len(), "Saved list");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryKeyValueStore {
        slots: Mutex<HashMap<String, String>>,
    }

    impl KeyValueStore for MemoryKeyValueStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.slots.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.slots.lock().unwrap().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.slots.lock().unwrap().remove(key);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryKeyValueStore;
    use super::*;
    use popcorn_models::WatchedEntry;

    fn entry(id: &str) -> WatchedEntry {
        WatchedEntry {
            id: id.to_string(),
            title: "Inception".to_string(),
            year: "2010".to_string(),
            poster_url: "https://example.com/i.jpg".to_string(),
            user_rating: 10,
            imdb_rating: 8.8,
            runtime_minutes: 148,
        }
    }

    #[test]
    fn test_missing_value_falls_back_to_initial_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(dir.path()));
        let list: PersistentList<WatchedEntry> = PersistentList::new(store, "watched");

        let initial = vec![entry("tt1375666")];
        let loaded = list.load(initial.clone()).unwrap();
        assert_eq!(loaded, initial);

        list.save(&loaded).unwrap();
        assert_eq!(list.load(Vec::new()).unwrap(), initial);
        assert!(dir.path().join("watched.json").exists());
        assert!(!dir.path().join("watched.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_value_is_backed_up() {
        let store = Arc::new(MemoryKeyValueStore::default());
        store.set("watched", "{not json").unwrap();

        let list: PersistentList<WatchedEntry> = PersistentList::new(store.clone(), "watched");
        let loaded = list.load(Vec::new()).unwrap();

        assert!(loaded.is_empty());
        assert_eq!(store.get("watched_corrupt").unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_clear_removes_value() {
        let store = Arc::new(MemoryKeyValueStore::default());
        let list: PersistentList<WatchedEntry> = PersistentList::new(store.clone(), "watched");
        list.save(&[entry("tt001")]).unwrap();
        list.clear().unwrap();
        assert_eq!(store.get("watched").unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path());
        assert!(matches!(store.get("../etc/passwd"), Err(StoreError::InvalidKey(_))));
        assert!(store.set("a/b", "x").is_err());
    }
}
