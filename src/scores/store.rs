use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// Persistence errors. Callers that cannot surface them (the game has no
/// error UI) are expected to drop them and keep playing.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store encoding error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The external key-value collaborator the ledger persists through.
/// Values are opaque strings; the ledger decides their encoding.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// Key-value store backed by a single JSON file. Missing or malformed
/// files read as empty; every `set` rewrites the file.
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open a store at an explicit path, loading whatever is already
    /// there.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();

        Self { path, entries }
    }

    /// Open the store under the platform data directory, falling back to
    /// the working directory when the platform offers none.
    pub fn open_default() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::open(base.join("neon_snake").join("scores.json"))
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }
}

/// In-memory store, used by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("scores.json"));
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn test_set_then_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");

        let mut store = FileStore::open(&path);
        store.set("top_scores", "[30,20,10]".to_string()).unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("top_scores"), Some("[30,20,10]".to_string()));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("scores.json");

        let mut store = FileStore::open(&path);
        store.set("key", "value".to_string()).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_malformed_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get("top_scores"), None);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), None);

        store.set("k", "v".to_string()).unwrap();
        assert_eq!(store.get("k"), Some("v".to_string()));
    }
}
