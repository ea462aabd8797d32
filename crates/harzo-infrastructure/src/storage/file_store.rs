//! File-backed key-value store.

use std::collections::BTreeMap;
use std::path::PathBuf;

use harzo_core::{KeyValueStore, Result};

use super::atomic_json::AtomicJsonFile;

/// A [`KeyValueStore`] persisted as one JSON object file.
///
/// Each mutation is a locked read-modify-write of the whole document, written
/// through a tmp file and an atomic rename.
pub struct FileKeyValueStore {
    file: AtomicJsonFile<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.file.load()?.unwrap_or_default();
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.file.update(BTreeMap::new(), |entries| {
            entries.insert(key.to_string(), value.to_string());
            Ok(())
        })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if !self.file.path().exists() {
            return Ok(());
        }
        self.file.update(BTreeMap::new(), |entries| {
            entries.remove(key);
            Ok(())
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        let store = FileKeyValueStore::new(path.clone());
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        drop(store);

        let reopened = FileKeyValueStore::new(path);
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_remove_only_touches_one_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("store.json"));
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        store.remove("a").unwrap();

        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_remove_on_missing_file_does_not_create_it() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        let store = FileKeyValueStore::new(path.clone());

        store.remove("a").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_file_reads_as_error_and_is_reset_on_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let store = FileKeyValueStore::new(path);

        assert!(store.get("a").is_err());

        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }
}
