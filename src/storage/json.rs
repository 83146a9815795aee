//! JSON file-based config store.
//!
//! The whole file is one JSON object whose members are the stored documents.
//! Writes go to a temporary sibling file which is then renamed over the target,
//! so a crash never leaves a half-written config behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "placemarks": {
//!     "favorites": [ ... ],
//!     "visits": [ ... ]
//!   }
//! }
//! ```

use crate::domain::error::{PlacemarksError, Result};
use crate::storage::backend::ConfigStore;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// JSON file config store.
///
/// The file is read once on [`JsonFileConfig::open`]; every [`ConfigStore::set`]
/// rewrites it. There is no locking; the file belongs to whichever thread owns
/// the placemarks store.
#[derive(Debug)]
pub struct JsonFileConfig {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory copy of the file's top-level object.
    data: Map<String, Value>,

    /// Set when `data` holds changes the file does not.
    dirty: bool,
}

impl JsonFileConfig {
    /// Opens a JSON config file, creating parent directories as needed.
    ///
    /// A missing file is treated as an empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but is not a JSON object
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use placemarks::storage::JsonFileConfig;
    /// use std::path::PathBuf;
    ///
    /// let config = JsonFileConfig::open(PathBuf::from("/tmp/placemarks.json"))?;
    /// # Ok::<(), placemarks::PlacemarksError>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON config");

        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("config file absent, starting empty");
            Map::new()
        };

        tracing::debug!(keys = data.len(), "config opened");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<Map<String, Value>> {
        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&contents)? {
            Value::Object(map) => Ok(map),
            other => Err(PlacemarksError::Storage(format!(
                "config root must be a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Writes the in-memory object to disk via temp file + rename.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        tracing::debug!(path = ?self.file_path, "saving config");

        let json = serde_json::to_string_pretty(&self.data)?;
        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!("config saved");
        Ok(())
    }
}

impl ConfigStore for JsonFileConfig {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let _span = tracing::debug_span!("json_config_set", key = %key).entered();

        self.data.insert(key.to_string(), value);
        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonFileConfig {
    /// Retries a write that failed earlier so the last value is not lost.
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty config on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save config on drop");
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
