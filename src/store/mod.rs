//! The favorites-and-recents store.
//!
//! [`PlacemarkStore`] owns the visit ledger and the ordered favorites list, and
//! dispatches favorites changes to observers. Its operations are split by
//! concern:
//!
//! - `locations`: resolving (host, path) pairs into shared locations
//! - `visits`: the visit ledger and frecency ranking
//! - `favorites`: composing and editing the favorites list
//! - `defaults`: the stock favorites used to seed a fresh store
//! - `observers`: change notification tickets
//!
//! # Threading
//!
//! The store is built on `Rc` and `RefCell` and is therefore `!Send`: it lives
//! on one thread, and every call completes synchronously. Observers run inside
//! the mutating call, after the mutation has been applied.
//!
//! # Persistence
//!
//! Nothing is written implicitly. [`PlacemarkStore::load`] reads the document
//! stored under a key and [`PlacemarkStore::save`] overwrites it.
//!
//! ```
//! use placemarks::storage::MemoryConfig;
//! use placemarks::store::{PlacemarkStore, StoreOptions};
//! use placemarks::vfs::MountedHost;
//!
//! let host = MountedHost::native();
//! let mut store = PlacemarkStore::new(StoreOptions::default());
//! store.report_visit(&*host, "/Users/bob/Documents");
//! store.add_favorite_at(&*host, "/Users/bob/Documents", "Docs");
//!
//! let mut config = MemoryConfig::default();
//! store.save(&mut config, "placemarks")?;
//!
//! let reloaded = PlacemarkStore::load(&config, "placemarks", StoreOptions::default())?;
//! assert_eq!(reloaded.favorites(), store.favorites());
//! # Ok::<(), placemarks::PlacemarksError>(())
//! ```

mod defaults;
mod favorites;
mod locations;
mod observers;
mod visits;

pub use defaults::{default_favorites, DEFAULT_FAVORITE_DIRS};
pub use observers::{ChangeNotifier, ObservationTicket};

use crate::domain::error::Result;
use crate::domain::{Favorite, Footprint, Visit};
use crate::storage::{codec, ConfigStore, DecodeOptions, DEFAULT_VISIT_COUNT_CAP};
use std::collections::HashMap;

/// Tunables for a store instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Visit count at which the frecency score stops growing.
    pub visit_count_cap: u32,
    /// Visits older than this many days are dropped on load. `None` keeps all.
    pub visit_retention_days: Option<u32>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            visit_count_cap: DEFAULT_VISIT_COUNT_CAP,
            visit_retention_days: None,
        }
    }
}

/// Favorites list, visit ledger and favorites change channel.
#[derive(Debug, Default)]
pub struct PlacemarkStore {
    options: StoreOptions,
    visits: HashMap<Footprint, Visit>,
    favorites: Vec<Favorite>,
    favorites_changed: ChangeNotifier,
    /// False until a loaded document carried a favorites array.
    has_persisted_favorites: bool,
}

impl PlacemarkStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(options: StoreOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Builds a store from the document under `key`.
    ///
    /// A missing key yields an empty store. Malformed records inside the
    /// document are skipped; see [`crate::storage::codec`].
    ///
    /// # Errors
    ///
    /// Returns an error only if the config store itself cannot be read.
    pub fn load(config: &dyn ConfigStore, key: &str, options: StoreOptions) -> Result<Self> {
        let _span = tracing::debug_span!("store_load", key = %key).entered();

        let mut store = Self::new(options);
        let Some(document) = config.get(key)? else {
            tracing::debug!("no stored document, starting empty");
            return Ok(store);
        };

        let decoded = codec::decode(
            &document,
            &DecodeOptions {
                visit_retention_days: options.visit_retention_days,
                now: chrono::Utc::now().timestamp(),
            },
        );
        if decoded.skipped > 0 {
            tracing::warn!(skipped = decoded.skipped, "some stored records could not be loaded");
        }

        store.visits = decoded.visits;
        store.favorites = decoded.favorites;
        store.has_persisted_favorites = decoded.has_favorites;

        tracing::debug!(
            favorites = store.favorites.len(),
            visits = store.visits.len(),
            "store loaded"
        );
        Ok(store)
    }

    /// Writes the full state under `key`, replacing whatever was there.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be built or the config store
    /// fails to persist it.
    pub fn save(&self, config: &mut dyn ConfigStore, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("store_save", key = %key).entered();

        let document = codec::encode(&self.favorites, &self.visits)?;
        config.set(key, document)?;

        tracing::debug!(
            favorites = self.favorites.len(),
            visits = self.visits.len(),
            "store saved"
        );
        Ok(())
    }

    /// Installs `make(self)` as the favorites list if no list was ever persisted.
    ///
    /// A user who deleted every favorite keeps an empty list: only a document
    /// without a favorites array, or no document at all, counts as fresh.
    /// `make` is only called when seeding happens. Returns whether it did.
    pub fn seed_if_fresh(&mut self, make: impl FnOnce(&Self) -> Vec<Favorite>) -> bool {
        if self.has_persisted_favorites || !self.favorites.is_empty() {
            return false;
        }

        let seeded = make(self);
        tracing::debug!(count = seeded.len(), "seeding default favorites");
        self.set_favorites(seeded);
        true
    }

    /// Tunables this store was created with.
    #[must_use]
    pub const fn options(&self) -> &StoreOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryConfig;
    use crate::vfs::MountedHost;
    use serde_json::json;

    #[test]
    fn test_load_missing_key() {
        let config = MemoryConfig::default();
        let store = PlacemarkStore::load(&config, "placemarks", StoreOptions::default()).unwrap();
        assert!(store.favorites().is_empty());
        assert!(store.frecently_used(10).is_empty());
    }

    #[test]
    fn test_save_overwrites_key() {
        let host = MountedHost::native();
        let mut config = MemoryConfig::default();
        config
            .set("placemarks", json!({ "favorites": [], "visits": [], "legacy": true }))
            .unwrap();

        let mut store = PlacemarkStore::new(StoreOptions::default());
        store.report_visit(&*host, "/tmp");
        store.save(&mut config, "placemarks").unwrap();

        let document = config.get("placemarks").unwrap().unwrap();
        assert!(document.get("legacy").is_none());
        assert_eq!(document["visits"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_seed_only_when_fresh() {
        let host = MountedHost::native();
        let make = |store: &PlacemarkStore| vec![store.compose_favorite(&*host, "/tmp", "").unwrap()];

        let mut fresh = PlacemarkStore::new(StoreOptions::default());
        assert!(fresh.seed_if_fresh(make));
        assert_eq!(fresh.favorites().len(), 1);
        assert!(!fresh.seed_if_fresh(make));

        let mut config = MemoryConfig::default();
        config.set("placemarks", json!({ "favorites": [] })).unwrap();
        let mut emptied = PlacemarkStore::load(&config, "placemarks", StoreOptions::default()).unwrap();
        assert!(!emptied.seed_if_fresh(make));
        assert!(emptied.favorites().is_empty());
    }

    #[test]
    fn test_seed_builder_skipped_when_not_fresh() {
        let host = MountedHost::native();
        let calls = std::cell::Cell::new(0);
        let make = |store: &PlacemarkStore| {
            calls.set(calls.get() + 1);
            vec![store.compose_favorite(&*host, "/tmp", "").unwrap()]
        };

        let mut config = MemoryConfig::default();
        config.set("placemarks", json!({ "favorites": [] })).unwrap();
        let mut emptied = PlacemarkStore::load(&config, "placemarks", StoreOptions::default()).unwrap();
        assert!(!emptied.seed_if_fresh(make));
        assert_eq!(calls.get(), 0);

        let mut fresh = PlacemarkStore::new(StoreOptions::default());
        assert!(fresh.seed_if_fresh(make));
        assert!(!fresh.seed_if_fresh(make));
        assert_eq!(calls.get(), 1);
        assert_eq!(fresh.favorite_count(), 1);
    }
}
