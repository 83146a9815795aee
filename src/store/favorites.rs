use super::{ObservationTicket, PlacemarkStore};
use crate::domain::Favorite;
use crate::vfs::VfsHost;

impl PlacemarkStore {
    /// Builds a favorite for `path` on `host` without adding it.
    ///
    /// Returns `None` if the host cannot currently be snapshotted. An empty
    /// `title` is replaced by the last component of the path.
    #[must_use]
    pub fn compose_favorite(&self, host: &dyn VfsHost, path: &str, title: &str) -> Option<Favorite> {
        let location = match self.resolve(host, path) {
            Ok(location) => location,
            Err(e) => {
                tracing::debug!(path = %path, error = %e, "cannot compose favorite");
                return None;
            }
        };

        let title = if title.is_empty() {
            location.display_name().to_string()
        } else {
            title.to_string()
        };
        Some(Favorite::new(location, title))
    }

    /// Composes a favorite and appends it.
    ///
    /// If composition fails nothing is added and no observer fires. Returns
    /// whether a favorite was added.
    pub fn add_favorite_at(&mut self, host: &dyn VfsHost, path: &str, title: &str) -> bool {
        match self.compose_favorite(host, path, title) {
            Some(favorite) => {
                self.add_favorite(favorite);
                true
            }
            None => false,
        }
    }

    /// Appends `favorite` to the list and notifies observers.
    ///
    /// Identical favorites are not merged; the list may hold duplicates.
    pub fn add_favorite(&mut self, favorite: Favorite) {
        tracing::debug!(
            footprint = %favorite.footprint(),
            title = %favorite.title(),
            "adding favorite"
        );
        self.favorites.push(favorite);
        self.favorites_changed.notify();
    }

    /// Replaces the whole list and notifies observers once.
    pub fn set_favorites(&mut self, favorites: Vec<Favorite>) {
        tracing::debug!(count = favorites.len(), "replacing favorites");
        self.favorites = favorites;
        self.favorites_changed.notify();
    }

    /// Returns a copy of the favorites list in user order.
    #[must_use]
    pub fn favorites(&self) -> Vec<Favorite> {
        self.favorites.clone()
    }

    /// Number of favorites, duplicates included.
    #[must_use]
    pub fn favorite_count(&self) -> usize {
        self.favorites.len()
    }

    /// Registers `callback` to run after every favorites change.
    ///
    /// The observer stays registered while the returned ticket is alive.
    pub fn observe_favorites_changes(&self, callback: impl Fn() + 'static) -> ObservationTicket {
        self.favorites_changed.observe(callback)
    }
}

#[cfg(test)]
mod tests {
    use crate::store::{PlacemarkStore, StoreOptions};
    use crate::vfs::MountedHost;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting(store: &PlacemarkStore) -> (Rc<Cell<u32>>, crate::store::ObservationTicket) {
        let fired = Rc::new(Cell::new(0));
        let handle = Rc::clone(&fired);
        let ticket = store.observe_favorites_changes(move || handle.set(handle.get() + 1));
        (fired, ticket)
    }

    #[test]
    fn test_compose_derives_title() {
        let host = MountedHost::native();
        let store = PlacemarkStore::new(StoreOptions::default());

        let derived = store.compose_favorite(&*host, "/Users/bob/Music", "").unwrap();
        assert_eq!(derived.title(), "Music");

        let explicit = store.compose_favorite(&*host, "/Users/bob/Music", "Tunes").unwrap();
        assert_eq!(explicit.title(), "Tunes");
        assert_eq!(explicit.footprint(), derived.footprint());
    }

    #[test]
    fn test_compose_fails_for_disconnected_host() {
        let native = MountedHost::native();
        let share = MountedHost::mount(&native, "smb", "//nas/media");
        share.set_connected(false);

        let mut store = PlacemarkStore::new(StoreOptions::default());
        let (fired, _ticket) = counting(&store);

        assert!(store.compose_favorite(&*share, "/movies", "").is_none());
        assert!(!store.add_favorite_at(&*share, "/movies", "Movies"));
        assert!(store.favorites().is_empty());
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_each_mutation_notifies_once() {
        let host = MountedHost::native();
        let mut store = PlacemarkStore::new(StoreOptions::default());
        let (fired, _ticket) = counting(&store);

        assert!(store.add_favorite_at(&*host, "/a", ""));
        assert_eq!(fired.get(), 1);

        let b = store.compose_favorite(&*host, "/b", "").unwrap();
        store.add_favorite(b);
        assert_eq!(fired.get(), 2);

        let mut reordered = store.favorites();
        reordered.reverse();
        store.set_favorites(reordered);
        assert_eq!(fired.get(), 3);

        store.set_favorites(Vec::new());
        assert_eq!(fired.get(), 4);
    }

    #[test]
    fn test_duplicates_and_order_are_kept() {
        let host = MountedHost::native();
        let mut store = PlacemarkStore::new(StoreOptions::default());
        store.add_favorite_at(&*host, "/z", "Zed");
        store.add_favorite_at(&*host, "/a", "Ay");
        store.add_favorite_at(&*host, "/z", "Zed");

        let titles: Vec<_> = store.favorites().iter().map(|f| f.title().to_string()).collect();
        assert_eq!(titles, ["Zed", "Ay", "Zed"]);

        let favorites = store.favorites();
        assert!(Rc::ptr_eq(favorites[0].location(), favorites[2].location()));
    }

    #[test]
    fn test_favorites_is_a_snapshot() {
        let host = MountedHost::native();
        let mut store = PlacemarkStore::new(StoreOptions::default());
        store.add_favorite_at(&*host, "/a", "");

        let mut copy = store.favorites();
        copy.clear();
        assert_eq!(store.favorites().len(), 1);
    }

    #[test]
    fn test_released_observer_stops_firing() {
        let host = MountedHost::native();
        let mut store = PlacemarkStore::new(StoreOptions::default());
        let (first, first_ticket) = counting(&store);
        let (second, _second_ticket) = counting(&store);

        store.add_favorite_at(&*host, "/a", "");
        drop(first_ticket);
        store.add_favorite_at(&*host, "/b", "");

        assert_eq!((first.get(), second.get()), (1, 2));
    }
}
