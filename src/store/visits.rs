use super::PlacemarkStore;
use crate::domain::{Footprint, Location, Visit};
use crate::storage::frecency;
use crate::vfs::VfsHost;
use std::collections::hash_map::Entry;
use std::rc::Rc;

impl PlacemarkStore {
    /// Records a visit to `path` on `host` at the current time.
    ///
    /// Visits feed the frecency ranking only and never notify favorites
    /// observers. A visit to an unreachable host is ignored.
    pub fn report_visit(&mut self, host: &dyn VfsHost, path: &str) {
        self.report_visit_at(host, path, chrono::Utc::now().timestamp());
    }

    /// Records a visit at an explicit Unix timestamp.
    pub fn report_visit_at(&mut self, host: &dyn VfsHost, path: &str, timestamp: i64) {
        let _span = tracing::debug_span!("report_visit", path = %path).entered();

        let location = match self.resolve(host, path) {
            Ok(location) => location,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring visit");
                return;
            }
        };

        match self.visits.entry(location.footprint()) {
            Entry::Occupied(mut occupied) => {
                let visit = occupied.get_mut();
                visit.bump(timestamp);
                tracing::debug!(count = visit.visits_count, "visit recorded");
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Visit::first(location, timestamp));
                tracing::debug!("first visit recorded");
            }
        }
    }

    /// Returns up to `amount` locations ranked by frecency, best first.
    #[must_use]
    pub fn frecently_used(&self, amount: usize) -> Vec<Rc<Location>> {
        self.frecently_used_at(amount, chrono::Utc::now().timestamp())
    }

    /// Ranks against an explicit Unix timestamp.
    #[must_use]
    pub fn frecently_used_at(&self, amount: usize, now: i64) -> Vec<Rc<Location>> {
        if amount == 0 || self.visits.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<&Visit> = self.visits.values().collect();
        frecency::sort_by_frecency(&mut ranked, now, self.options.visit_count_cap);

        ranked
            .into_iter()
            .take(amount)
            .map(|visit| Rc::clone(&visit.location))
            .collect()
    }

    /// Ledger entry for `footprint` as (visit count, last visit).
    #[must_use]
    pub fn visit(&self, footprint: Footprint) -> Option<(u32, i64)> {
        self.visits
            .get(&footprint)
            .map(|visit| (visit.visits_count, visit.last_visit))
    }

    /// Number of distinct locations in the ledger.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visits.len()
    }

    /// Forgets every recorded visit. Favorites are untouched and no observer fires.
    pub fn clear_visited(&mut self) {
        tracing::debug!(cleared = self.visits.len(), "clearing visited locations");
        self.visits.clear();
    }
}

#[cfg(test)]
mod tests {
    use crate::store::{PlacemarkStore, StoreOptions};
    use crate::vfs::MountedHost;
    use std::cell::Cell;
    use std::rc::Rc;

    const NOW: i64 = 1_700_000_000;
    const YEAR: i64 = 365 * 86_400;

    #[test]
    fn test_visits_dedup_by_footprint() {
        let host = MountedHost::native();
        let mut store = PlacemarkStore::new(StoreOptions::default());
        for _ in 0..5 {
            store.report_visit_at(&*host, "/var/log", NOW);
        }
        store.report_visit_at(&*host, "/var//log/", NOW + 10);

        assert_eq!(store.visited_count(), 1);
        let footprint = store.resolve(&*host, "/var/log").unwrap().footprint();
        assert_eq!(store.visit(footprint), Some((6, NOW + 10)));
    }

    #[test]
    fn test_frequent_recent_beats_single_old() {
        let host = MountedHost::native();
        let mut store = PlacemarkStore::new(StoreOptions::default());
        store.report_visit_at(&*host, "/old", NOW - YEAR);
        for _ in 0..10 {
            store.report_visit_at(&*host, "/busy", NOW);
        }

        let top = store.frecently_used_at(1, NOW);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].path(), "/busy/");
    }

    #[test]
    fn test_frecently_used_bounds() {
        let host = MountedHost::native();
        let mut store = PlacemarkStore::new(StoreOptions::default());
        store.report_visit_at(&*host, "/a", NOW);
        store.report_visit_at(&*host, "/b", NOW - 10);

        assert!(store.frecently_used_at(0, NOW).is_empty());
        let all = store.frecently_used_at(10, NOW);
        let paths: Vec<_> = all.iter().map(|l| l.path()).collect();
        assert_eq!(paths, ["/a/", "/b/"]);
    }

    #[test]
    fn test_unreachable_visit_is_ignored() {
        let native = MountedHost::native();
        let share = MountedHost::mount(&native, "sftp", "files.example.org");
        share.set_connected(false);

        let mut store = PlacemarkStore::new(StoreOptions::default());
        store.report_visit_at(&*share, "/home", NOW);
        assert_eq!(store.visited_count(), 0);
    }

    #[test]
    fn test_clear_visited_keeps_favorites_and_is_silent() {
        let host = MountedHost::native();
        let mut store = PlacemarkStore::new(StoreOptions::default());
        store.add_favorite_at(&*host, "/srv", "");
        store.report_visit_at(&*host, "/srv", NOW);

        let fired = Rc::new(Cell::new(0));
        let handle = Rc::clone(&fired);
        let _ticket = store.observe_favorites_changes(move || handle.set(handle.get() + 1));

        store.report_visit_at(&*host, "/tmp", NOW);
        store.clear_visited();

        assert!(store.frecently_used_at(100, NOW).is_empty());
        assert_eq!(store.favorites().len(), 1);
        assert_eq!(fired.get(), 0);
    }
}
