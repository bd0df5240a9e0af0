use std::collections::HashMap;
use std::sync::RwLock;

use super::KeyValueStore;
use crate::error::{RecipifyError, Result};

/// In-process store, mostly useful for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> RecipifyError {
    RecipifyError::StoreError("memory store lock poisoned".to_string())
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }
}
