use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::KeyValueStore;
use crate::error::{RecipifyError, Result};

/// Keeps every key in a single JSON object on disk.
///
/// Each write reads the whole file, changes one key, and writes it back.
/// Concurrent writers from other processes are not coordinated; the last
/// write wins.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                RecipifyError::StoreError(format!(
                    "{} is not a valid store file: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, contents)?;
        debug!("Wrote {} keys to {}", entries.len(), self.path.display());
        Ok(())
    }

    fn update(&self, change: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| RecipifyError::StoreError("file store lock poisoned".to_string()))?;
        let mut entries = self.read_all()?;
        change(&mut entries);
        self.write_all(&entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.json"));
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = FileStore::new(&path);
        store.set("userIngredients", "kale, lemon").unwrap();
        store.set("other", "1").unwrap();
        store.remove("other").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("userIngredients").unwrap().as_deref(),
            Some("kale, lemon")
        );
        assert_eq!(reopened.get("other").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        let err = store.get("userRecipes").unwrap_err();
        assert!(matches!(err, RecipifyError::StoreError(_)));
    }
}
