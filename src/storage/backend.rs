//! Config store abstraction.
//!
//! This module defines the [`ConfigStore`] trait: a structured key/value store
//! holding one JSON document per key. The placemarks store reads its document
//! at construction and writes it back on demand, so any backend that can hold a
//! `serde_json::Value` under a string key will do.
//!
//! # Implementations
//!
//! - [`crate::storage::JsonFileConfig`]: JSON object file with atomic writes
//! - [`MemoryConfig`]: in-memory map, used for tests and embedding

use crate::domain::error::Result;
use serde_json::Value;
use std::collections::HashMap;

/// A structured config store keyed by string.
///
/// # Examples
///
/// ```
/// use placemarks::storage::{ConfigStore, MemoryConfig};
///
/// let mut config = MemoryConfig::default();
/// config.set("panel", serde_json::json!({"favorites": []}))?;
/// assert!(config.get("panel")?.is_some());
/// assert!(config.get("missing")?.is_none());
/// # Ok::<(), placemarks::PlacemarksError>(())
/// ```
pub trait ConfigStore {
    /// Returns the document stored under `key`, `Ok(None)` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replaces the document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted. Callers must not
    /// assume the previous value survived a failed write.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

/// Config store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfig {
    values: HashMap<String, Value>,
}

impl ConfigStore for MemoryConfig {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
