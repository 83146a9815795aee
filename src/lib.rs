//! Placemarks: favorites and frecently-used locations for virtual filesystem hosts.
//!
//! The crate keeps two collections for a file manager's panels:
//! - an explicit, ordered list of user-curated favorites
//! - a ledger of implicit visits, ranked by frecency (frequency + recency)
//!
//! Both refer to shared, immutable locations identified by a content footprint,
//! and both are persisted as one JSON document in a structured config store.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Store (store/)                                     │  ← Core logic
//! │  - Location resolution and dedup                    │
//! │  - Visit ledger and frecency ranking                │
//! │  - Favorites list and change observers              │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ VFS (vfs/)    │   │ Storage       │   │ Domain        │
//! │ - Host trait  │   │ (storage/)    │   │ (domain/)     │
//! │ - Mount stack │   │ - Config API  │   │ - Location    │
//! │   snapshots   │   │ - JSON codec  │   │ - Favorite    │
//! │               │   │ - Frecency    │   │ - Errors      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Observability                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Rotating log file (observability/)               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Locations, favorites, visits, errors
//! - [`vfs`]: Host abstraction and mount-stack snapshots
//! - [`storage`]: Config store backends, document codec, frecency scoring
//! - [`store`]: The favorites-and-recents store
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: Tracing subscriber setup
//!
//! # Configuration
//!
//! Optional TOML file, every key may be omitted:
//!
//! ```toml
//! data_dir = "/home/bob/.local/share/placemarks"
//! document_key = "placemarks"
//! trace_level = "debug"
//! visit_count_cap = 32
//! visit_retention_days = 90
//! seed_default_favorites = true
//! ```
//!
//! # Examples
//!
//! ```rust
//! use placemarks::storage::MemoryConfig;
//! use placemarks::vfs::MountedHost;
//! use placemarks::{open_store, Config};
//!
//! let config = Config { seed_default_favorites: false, ..Default::default() };
//! let mut backend = MemoryConfig::default();
//! let host = MountedHost::native();
//!
//! let mut store = open_store(&config, &backend, &*host, "/Users/bob")?;
//! for _ in 0..3 {
//!     store.report_visit(&*host, "/Users/bob/Documents");
//! }
//! store.add_favorite_at(&*host, "/Users/bob/Documents", "Docs");
//! store.save(&mut backend, &config.document_key)?;
//!
//! let reopened = open_store(&config, &backend, &*host, "/Users/bob")?;
//! assert_eq!(reopened.favorites()[0].title(), "Docs");
//! assert_eq!(reopened.frecently_used(1)[0].path(), "/Users/bob/Documents/");
//! # Ok::<(), placemarks::PlacemarksError>(())
//! ```

pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod store;
pub mod vfs;

pub use domain::{Favorite, Footprint, HostLayer, HostStack, Location, PlacemarksError, Result};
pub use store::{ObservationTicket, PlacemarkStore, StoreOptions};

use serde::Deserialize;
use std::path::{Path, PathBuf};
use storage::ConfigStore;
use vfs::VfsHost;

/// Default key of the document inside the config store.
pub const DEFAULT_DOCUMENT_KEY: &str = "placemarks";

/// Application configuration.
///
/// Every field has a default, so an empty TOML file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory for the config document and the log file.
    ///
    /// `None` selects the platform data directory, see
    /// [`infrastructure::get_data_dir`].
    pub data_dir: Option<PathBuf>,

    /// Key the store's document is saved under.
    pub document_key: String,

    /// Tracing level filter.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. Default: `"info"`
    pub trace_level: Option<String>,

    /// Visit count at which frecency stops growing.
    pub visit_count_cap: u32,

    /// Drop visits older than this many days when loading.
    pub visit_retention_days: Option<u32>,

    /// Seed the stock favorites when no favorites were ever saved.
    pub seed_default_favorites: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            document_key: DEFAULT_DOCUMENT_KEY.to_string(),
            trace_level: None,
            visit_count_cap: storage::DEFAULT_VISIT_COUNT_CAP,
            visit_retention_days: None,
            seed_default_favorites: true,
        }
    }
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`PlacemarksError::Config`] for malformed TOML, unknown keys,
    /// or an empty document key.
    ///
    /// # Example
    ///
    /// ```rust
    /// use placemarks::Config;
    ///
    /// let config = Config::from_toml_str("visit_retention_days = 30")?;
    /// assert_eq!(config.visit_retention_days, Some(30));
    /// assert_eq!(config.document_key, "placemarks");
    /// # Ok::<(), placemarks::PlacemarksError>(())
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| PlacemarksError::Config(e.to_string()))?;

        if config.document_key.trim().is_empty() {
            return Err(PlacemarksError::Config(
                "document_key must not be empty".to_string(),
            ));
        }
        Ok(config)
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = ?path, "reading configuration");
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Directory holding the config document and logs.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(infrastructure::get_data_dir)
    }

    /// Path of the JSON config file inside [`Config::data_dir`].
    #[must_use]
    pub fn document_path(&self) -> PathBuf {
        self.data_dir().join("placemarks.json")
    }

    /// Store tunables derived from this configuration.
    #[must_use]
    pub const fn store_options(&self) -> StoreOptions {
        StoreOptions {
            visit_count_cap: self.visit_count_cap,
            visit_retention_days: self.visit_retention_days,
        }
    }
}

/// Loads the store described by `config` from `backend`.
///
/// When seeding is enabled and nothing was ever saved, the stock favorites
/// under `home` on `host` are installed.
///
/// # Errors
///
/// Returns an error if the backend cannot be read.
pub fn open_store(
    config: &Config,
    backend: &dyn ConfigStore,
    host: &dyn VfsHost,
    home: &str,
) -> Result<PlacemarkStore> {
    let mut store = PlacemarkStore::load(backend, &config.document_key, config.store_options())?;

    if config.seed_default_favorites {
        store.seed_if_fresh(|fresh| store::default_favorites(fresh, host, home));
    }

    tracing::debug!(
        favorites = store.favorite_count(),
        visited = store.visited_count(),
        "store opened"
    );
    Ok(store)
}
