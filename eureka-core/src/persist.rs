//! Key-value persistence for data that outlives a session.
//!
//! The medium is a string store with `get`/`set` that may fail. Callers decide
//! how much a failure matters; favorites treat every failure as "no data".

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tokio::fs;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid store format: expected a JSON object at the top level")]
    InvalidFormat,

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// A string key-value medium.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value. A missing key is `Ok(None)`.
    async fn get(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// A store backed by a single JSON object file, one string value per key.
///
/// A missing file reads as an empty store and is created on first write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<Map<String, Value>, PersistError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(PersistError::InvalidFormat),
        }
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        let map = self.read_map().await?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        // A corrupt file is replaced rather than blocking every future write
        let mut map = match self.read_map().await {
            Ok(map) => map,
            Err(PersistError::Io(e)) => return Err(PersistError::Io(e)),
            Err(_) => Map::new(),
        };
        map.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}

/// An in-process store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds one value.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.insert(key, value);
        store
    }

    fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.into(), value.into());
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        let values = self
            .values
            .lock()
            .map_err(|e| PersistError::Unavailable(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| PersistError::Unavailable(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
