//! Stock favorites for a store that has never been saved.

use super::PlacemarkStore;
use crate::domain::Favorite;
use crate::vfs::VfsHost;

/// Directories under the home directory that make up the default list,
/// as (relative path, title). The home directory itself comes first.
pub const DEFAULT_FAVORITE_DIRS: [(&str, &str); 7] = [
    ("", "Home"),
    ("Desktop", "Desktop"),
    ("Documents", "Documents"),
    ("Downloads", "Downloads"),
    ("Pictures", "Pictures"),
    ("Movies", "Movies"),
    ("Music", "Music"),
];

/// Composes the default favorites rooted at `home` on `host`.
///
/// Entries the host cannot reach are left out. The directories are not checked
/// for existence: resolving them is the VFS layer's business.
///
/// # Examples
///
/// ```
/// use placemarks::store::{default_favorites, PlacemarkStore, StoreOptions};
/// use placemarks::vfs::MountedHost;
///
/// let host = MountedHost::native();
/// let store = PlacemarkStore::new(StoreOptions::default());
/// let defaults = default_favorites(&store, &*host, "/Users/bob");
/// assert_eq!(defaults[0].title(), "Home");
/// assert_eq!(defaults[2].location().path(), "/Users/bob/Documents/");
/// ```
#[must_use]
pub fn default_favorites(store: &PlacemarkStore, host: &dyn VfsHost, home: &str) -> Vec<Favorite> {
    let home = home.trim_end_matches('/');
    DEFAULT_FAVORITE_DIRS
        .iter()
        .filter_map(|(relative, title)| {
            let path = if relative.is_empty() {
                format!("{home}/")
            } else {
                format!("{home}/{relative}")
            };
            store.compose_favorite(host, &path, title)
        })
        .collect()
}
