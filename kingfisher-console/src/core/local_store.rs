//! Local key-value store
//!
//! File-backed stand-in for the browser's persistent storage: one JSON
//! object holding the bearer token and UI preferences. Reads hit the
//! disk on every call so independent handles, including ones in other
//! processes, observe each other's writes.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

const STORE_FILE: &str = "local_store.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Handle to the shared store file under the console data directory
#[derive(Debug, Clone)]
pub struct LocalStore {
    file_path: PathBuf,
}

impl LocalStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file_path: data_dir.join(STORE_FILE),
        }
    }

    /// An unreadable or unparsable store degrades to empty
    fn read_map(&self) -> Map<String, Value> {
        match std::fs::read_to_string(&self.file_path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Map::new(),
        }
    }

    fn save(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.file_path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.read_map().get(key).cloned()
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(|v| v.as_str().map(str::to_string))
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    pub fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value);
        self.save(&map)
    }

    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            self.save(&map)?;
        }
        Ok(())
    }
}
