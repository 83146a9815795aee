use placemarks::storage::{ConfigStore, JsonFileConfig, MemoryConfig};
use placemarks::vfs::MountedHost;
use placemarks::{Footprint, PlacemarkStore, PlacemarksError, StoreOptions};
use serde_json::{json, Value};
use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

const KEY: &str = "placemarks";
const NOW: i64 = 1_700_000_000;

fn ledger(store: &PlacemarkStore) -> HashMap<Footprint, (u32, i64)> {
    store
        .frecently_used_at(usize::MAX, NOW)
        .iter()
        .map(|location| {
            let footprint = location.footprint();
            (footprint, store.visit(footprint).unwrap())
        })
        .collect()
}

#[test]
fn test_documents_scenario_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("placemarks.json");
    let host = MountedHost::native();
    let docs = "/Users/bob/Documents";

    let favorites_before = {
        let mut store = PlacemarkStore::new(StoreOptions::default());
        for _ in 0..3 {
            store.report_visit(&*host, docs);
        }

        let footprint = store.resolve(&*host, docs).unwrap().footprint();
        assert_eq!(store.visit(footprint).map(|(count, _)| count), Some(3));

        let top = store.frecently_used(1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].footprint(), footprint);

        store.add_favorite_at(&*host, docs, "Docs");
        let favorites = store.favorites();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].title(), "Docs");
        assert_eq!(favorites[0].location().path(), "/Users/bob/Documents/");
        assert!(Rc::ptr_eq(favorites[0].location(), &top[0]));

        let mut config = JsonFileConfig::open(path.clone()).unwrap();
        store.save(&mut config, KEY).unwrap();
        favorites
    };

    let config = JsonFileConfig::open(path).unwrap();
    let reloaded = PlacemarkStore::load(&config, KEY, StoreOptions::default()).unwrap();
    assert_eq!(reloaded.favorites(), favorites_before);

    let favorites = reloaded.favorites();
    let recent = reloaded.frecently_used(1);
    assert!(Rc::ptr_eq(favorites[0].location(), &recent[0]));
}

#[test]
fn test_round_trip_preserves_order_and_ledger() {
    let native = MountedHost::native();
    let mut options = BTreeMap::new();
    options.insert("user".to_string(), "bob".to_string());
    options.insert("port".to_string(), "2222".to_string());
    let sftp = MountedHost::mount_with_options(&native, "sftp", "files.example.org", options);
    let archive = MountedHost::mount(&sftp, "archive", "/backups/2024.tar");

    let mut store = PlacemarkStore::new(StoreOptions::default());
    store.report_visit_at(&*native, "/tmp", NOW - 30);
    store.report_visit_at(&*native, "/tmp", NOW - 10);
    store.report_visit_at(&*sftp, "/home/bob", NOW - 86_400 * 3);
    store.report_visit_at(&*archive, "/etc", NOW - 86_400 * 400);

    store.add_favorite_at(&*archive, "/etc", "");
    store.add_favorite_at(&*native, "/tmp", "Scratch");
    store.add_favorite_at(&*sftp, "/home/bob", "Remote home");
    store.add_favorite_at(&*native, "/tmp", "Scratch");

    // A user-driven reorder must survive persistence too.
    let mut reordered = store.favorites();
    reordered.swap(0, 2);
    store.set_favorites(reordered);

    let mut config = MemoryConfig::default();
    store.save(&mut config, KEY).unwrap();
    let reloaded = PlacemarkStore::load(&config, KEY, StoreOptions::default()).unwrap();

    assert_eq!(reloaded.favorites(), store.favorites());
    assert_eq!(ledger(&reloaded), ledger(&store));
    assert_eq!(reloaded.visited_count(), 3);

    let titles: Vec<_> = reloaded
        .favorites()
        .iter()
        .map(|f| f.display_title().to_string())
        .collect();
    assert_eq!(titles, ["Remote home", "Scratch", "etc", "Scratch"]);

    // Saving the reloaded store reproduces the same document.
    let mut again = MemoryConfig::default();
    reloaded.save(&mut again, KEY).unwrap();
    assert_eq!(again.get(KEY).unwrap(), config.get(KEY).unwrap());
}

#[test]
fn test_corrupt_records_do_not_block_startup() {
    let mut config = MemoryConfig::default();
    let host = MountedHost::native();
    let mut store = PlacemarkStore::new(StoreOptions::default());
    store.add_favorite_at(&*host, "/good", "Good");
    store.report_visit_at(&*host, "/good", NOW);
    store.save(&mut config, KEY).unwrap();

    let mut document = config.get(KEY).unwrap().unwrap();
    document["favorites"]
        .as_array_mut()
        .unwrap()
        .push(json!({ "location": 17, "title": "bad" }));
    document["visits"]
        .as_array_mut()
        .unwrap()
        .push(json!({ "path": "/no-stack", "count": 1, "lastVisit": NOW }));
    config.set(KEY, document).unwrap();

    let reloaded = PlacemarkStore::load(&config, KEY, StoreOptions::default()).unwrap();
    assert_eq!(reloaded.favorites().len(), 1);
    assert_eq!(reloaded.favorites()[0].title(), "Good");
    assert_eq!(reloaded.visited_count(), 1);
}

#[test]
fn test_instances_are_independent() {
    let host = MountedHost::native();
    let mut first = PlacemarkStore::new(StoreOptions::default());
    let second = PlacemarkStore::new(StoreOptions::default());

    let fired = Rc::new(Cell::new(0));
    let handle = Rc::clone(&fired);
    let _ticket = second.observe_favorites_changes(move || handle.set(handle.get() + 1));

    first.add_favorite_at(&*host, "/a", "");
    first.report_visit(&*host, "/a");

    assert!(second.favorites().is_empty());
    assert_eq!(second.visited_count(), 0);
    assert_eq!(fired.get(), 0);
}

#[test]
fn test_retention_applies_on_load() {
    let host = MountedHost::native();
    let now = chrono::Utc::now().timestamp();
    let mut store = PlacemarkStore::new(StoreOptions::default());
    store.report_visit_at(&*host, "/recent", now - 86_400);
    store.report_visit_at(&*host, "/ancient", now - 86_400 * 200);

    let mut config = MemoryConfig::default();
    store.save(&mut config, KEY).unwrap();

    let options = StoreOptions {
        visit_retention_days: Some(90),
        ..StoreOptions::default()
    };
    let reloaded = PlacemarkStore::load(&config, KEY, options).unwrap();
    let paths: Vec<_> = reloaded
        .frecently_used(10)
        .iter()
        .map(|l| l.path().to_string())
        .collect();
    assert_eq!(paths, ["/recent/"]);
}

#[test]
fn test_save_reports_unwritable_file() {
    let dir = tempfile::tempdir().unwrap();
    let parent = dir.path().join("sub");
    let mut config = JsonFileConfig::open(parent.join("placemarks.json")).unwrap();
    std::fs::remove_dir_all(&parent).unwrap();

    let host = MountedHost::native();
    let mut store = PlacemarkStore::new(StoreOptions::default());
    store.add_favorite_at(&*host, "/srv", "Server");

    let err = store.save(&mut config, KEY).unwrap_err();
    assert!(matches!(err, PlacemarksError::Io(_)), "{err}");
}

/// Backend whose writes always fail.
struct ReadOnlyConfig;

impl ConfigStore for ReadOnlyConfig {
    fn get(&self, _key: &str) -> placemarks::Result<Option<Value>> {
        Ok(None)
    }

    fn set(&mut self, key: &str, _value: Value) -> placemarks::Result<()> {
        Err(PlacemarksError::Storage(format!("{key} is read-only")))
    }
}

#[test]
fn test_save_propagates_backend_error() {
    let host = MountedHost::native();
    let mut store = PlacemarkStore::load(&ReadOnlyConfig, KEY, StoreOptions::default()).unwrap();
    store.report_visit(&*host, "/var/log");

    match store.save(&mut ReadOnlyConfig, KEY) {
        Err(PlacemarksError::Storage(message)) => assert_eq!(message, "placemarks is read-only"),
        other => panic!("unexpected save result: {other:?}"),
    }
}
