//! Unit tests for the BookmarkManager public API.
//!
//! These tests exercise the ordered bookmark list through the
//! `BookmarkManagerTrait` interface, backed by the in-memory blob store or a
//! temporary SQLite file.

use rstest::rstest;
use tempfile::TempDir;

use seesound::database::{Database, KeyValueStore, MemoryKvStore, SqliteKvStore};
use seesound::managers::bookmark_manager::{
    load_all, BookmarkManager, BookmarkManagerTrait, BOOKMARKS_KEY,
};
use seesound::types::bookmark::Bookmark;
use seesound::types::errors::BookmarkError;

/// Helper: a manager plus a second handle onto the same memory store.
fn setup() -> (BookmarkManager, MemoryKvStore) {
    let store = MemoryKvStore::new();
    let mgr = BookmarkManager::new(Box::new(store.clone()));
    (mgr, store)
}

fn stored(store: &MemoryKvStore) -> Vec<Bookmark> {
    load_all(store).expect("stored bookmarks should decode")
}

/// An empty store gives an empty list.
#[test]
fn test_empty_store_starts_empty() {
    let (mgr, store) = setup();
    assert!(mgr.list_bookmarks().is_empty());
    assert!(!mgr.is_dirty());
    assert!(store.get(BOOKMARKS_KEY).unwrap().is_none());
}

/// Adding appends to the end and writes through to the store.
#[test]
fn test_add_appends_and_persists() {
    let (mut mgr, store) = setup();

    let first = mgr.add_bookmark("Example", "https://example.com/").unwrap();
    let second = mgr.add_bookmark("Rust", "https://rust-lang.org/").unwrap();
    assert_ne!(first, second);

    let list = mgr.list_bookmarks();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, first);
    assert_eq!(list[1].title, "Rust");

    assert_eq!(stored(&store), list.to_vec());
}

/// A blank title is replaced by the URL.
#[test]
fn test_blank_title_falls_back_to_url() {
    let (mut mgr, _store) = setup();
    mgr.add_bookmark("   ", "https://example.com/").unwrap();
    assert_eq!(mgr.list_bookmarks()[0].title, "https://example.com/");
}

/// Deleting by index keeps the order of the others, in memory and on disk.
#[test]
fn test_remove_at_preserves_order() {
    let (mut mgr, store) = setup();
    for (title, url) in [("A", "https://a.com/"), ("B", "https://b.com/"), ("C", "https://c.com/")] {
        mgr.add_bookmark(title, url).unwrap();
    }

    let removed = mgr.remove_at(1).unwrap();
    assert_eq!(removed.title, "B");

    let titles: Vec<&str> = mgr.list_bookmarks().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "C"]);
    let on_disk: Vec<String> = stored(&store).into_iter().map(|b| b.title).collect();
    assert_eq!(on_disk, vec!["A", "C"]);
}

/// Removing past the end is an index error.
#[rstest]
#[case(0, 0)]
#[case(2, 2)]
#[case(5, 2)]
fn test_remove_at_out_of_range(#[case] index: usize, #[case] count: usize) {
    let (mut mgr, _store) = setup();
    for i in 0..count {
        mgr.add_bookmark(&format!("t{}", i), &format!("https://site{}.com/", i)).unwrap();
    }
    let err = mgr.remove_at(index).unwrap_err();
    assert!(matches!(err, BookmarkError::InvalidIndex(i) if i == index));
    assert_eq!(mgr.list_bookmarks().len(), count);
}

/// Bookmarks can be removed by id.
#[test]
fn test_remove_by_id() {
    let (mut mgr, _store) = setup();
    let id = mgr.add_bookmark("A", "https://a.com/").unwrap();
    mgr.add_bookmark("B", "https://b.com/").unwrap();

    let removed = mgr.remove_bookmark(&id).unwrap();
    assert_eq!(removed.id, id);
    assert_eq!(mgr.list_bookmarks().len(), 1);

    assert!(matches!(mgr.remove_bookmark(&id), Err(BookmarkError::NotFound(_))));
}

/// Lookup by index returns the bookmark or nothing.
#[test]
fn test_get_by_index() {
    let (mut mgr, _store) = setup();
    mgr.add_bookmark("A", "https://a.com/").unwrap();
    assert_eq!(mgr.get(0).map(|b| b.url.as_str()), Some("https://a.com/"));
    assert!(mgr.get(1).is_none());
}

/// A failed write keeps the entry in memory, marks the list dirty, and a
/// later flush writes it once the store recovers.
#[test]
fn test_persistence_failure_keeps_entry_and_flush_retries() {
    let (mut mgr, store) = setup();
    store.set_fail_writes(true);

    let err = mgr.add_bookmark("Offline", "https://offline.com/").unwrap_err();
    assert!(matches!(err, BookmarkError::Persistence(_)));
    assert_eq!(mgr.list_bookmarks().len(), 1);
    assert!(mgr.is_dirty());
    assert!(store.get(BOOKMARKS_KEY).unwrap().is_none());

    assert!(mgr.flush().is_err());
    assert!(mgr.is_dirty());

    store.set_fail_writes(false);
    mgr.flush().unwrap();
    assert!(!mgr.is_dirty());
    assert_eq!(stored(&store).len(), 1);
}

/// Flushing with nothing pending writes nothing.
#[test]
fn test_flush_when_clean_is_noop() {
    let (mut mgr, store) = setup();
    mgr.flush().unwrap();
    assert!(store.get(BOOKMARKS_KEY).unwrap().is_none());
}

/// An unreadable stored list loads as empty.
#[test]
fn test_corrupt_blob_starts_empty() {
    let store = MemoryKvStore::new();
    store.insert_raw(BOOKMARKS_KEY, b"{ definitely not a list");
    let mgr = BookmarkManager::new(Box::new(store));
    assert!(mgr.list_bookmarks().is_empty());
}

/// Bookmarks survive reopening the SQLite file.
#[test]
fn test_reload_from_sqlite_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("seesound.db");

    let ids: Vec<String> = {
        let store = SqliteKvStore::new(Database::open(&path).unwrap());
        let mut mgr = BookmarkManager::new(Box::new(store));
        vec![
            mgr.add_bookmark("One", "https://one.com/").unwrap(),
            mgr.add_bookmark("Two", "https://two.com/").unwrap(),
        ]
    };

    let store = SqliteKvStore::new(Database::open(&path).unwrap());
    let mgr = BookmarkManager::new(Box::new(store));
    let reloaded: Vec<String> = mgr.list_bookmarks().iter().map(|b| b.id.clone()).collect();
    assert_eq!(reloaded, ids);
}
