//! Bookmark Manager for SeeSound.
//!
//! Keeps the ordered bookmark list in memory and writes the whole list to the
//! key-value store as one JSON array after every mutation.

use crate::database::KeyValueStore;
use crate::types::bookmark::Bookmark;
use crate::types::errors::{BookmarkError, StorageError};

/// Fixed storage key for the serialized bookmark list.
pub const BOOKMARKS_KEY: &str = "bookmarks";

/// Trait defining bookmark management operations.
pub trait BookmarkManagerTrait {
    fn add_bookmark(&mut self, title: &str, url: &str) -> Result<String, BookmarkError>;
    fn remove_at(&mut self, index: usize) -> Result<Bookmark, BookmarkError>;
    fn remove_bookmark(&mut self, id: &str) -> Result<Bookmark, BookmarkError>;
    fn get(&self, index: usize) -> Option<&Bookmark>;
    fn list_bookmarks(&self) -> &[Bookmark];
    fn flush(&mut self) -> Result<(), BookmarkError>;
    fn is_dirty(&self) -> bool;
}

/// Reads the persisted list. A missing key is an empty list.
pub fn load_all(store: &dyn KeyValueStore) -> Result<Vec<Bookmark>, StorageError> {
    match store.get(BOOKMARKS_KEY)? {
        Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
        None => Ok(Vec::new()),
    }
}

/// Replaces the persisted list.
pub fn save_all(store: &mut dyn KeyValueStore, bookmarks: &[Bookmark]) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec(bookmarks)?;
    store.put(BOOKMARKS_KEY, &bytes)
}

/// Bookmark manager over any blob store.
pub struct BookmarkManager {
    store: Box<dyn KeyValueStore>,
    bookmarks: Vec<Bookmark>,
    dirty: bool,
}

impl BookmarkManager {
    /// Creates a manager and loads the persisted list.
    ///
    /// An unreadable blob is logged and treated as empty; the next mutation
    /// overwrites it.
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        let bookmarks = match load_all(store.as_ref()) {
            Ok(list) => list,
            Err(e) => {
                log::error!("failed to load bookmarks, starting empty: {}", e);
                Vec::new()
            }
        };
        log::debug!("loaded {} bookmarks", bookmarks.len());
        Self {
            store,
            bookmarks,
            dirty: false,
        }
    }

    /// Writes the list. On failure the in-memory list is kept and the manager
    /// stays dirty until a later write succeeds.
    fn persist(&mut self) -> Result<(), BookmarkError> {
        match save_all(self.store.as_mut(), &self.bookmarks) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                self.dirty = true;
                log::error!(
                    "bookmark list not saved ({} entries kept in memory): {}",
                    self.bookmarks.len(),
                    e
                );
                Err(BookmarkError::Persistence(e))
            }
        }
    }
}

impl BookmarkManagerTrait for BookmarkManager {
    /// Appends a bookmark and returns its id.
    ///
    /// The bookmark is kept even when the write fails; the error only reports
    /// that it is not yet on disk.
    fn add_bookmark(&mut self, title: &str, url: &str) -> Result<String, BookmarkError> {
        let bookmark = Bookmark::new(title, url);
        let id = bookmark.id.clone();
        log::debug!("adding bookmark {} -> {}", bookmark.title, bookmark.url);
        self.bookmarks.push(bookmark);
        self.persist()?;
        Ok(id)
    }

    /// Removes the bookmark at `index`, preserving the order of the rest.
    fn remove_at(&mut self, index: usize) -> Result<Bookmark, BookmarkError> {
        if index >= self.bookmarks.len() {
            return Err(BookmarkError::InvalidIndex(index));
        }
        let removed = self.bookmarks.remove(index);
        self.persist()?;
        Ok(removed)
    }

    /// Removes a bookmark by ID.
    fn remove_bookmark(&mut self, id: &str) -> Result<Bookmark, BookmarkError> {
        let index = self
            .bookmarks
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))?;
        self.remove_at(index)
    }

    fn get(&self, index: usize) -> Option<&Bookmark> {
        self.bookmarks.get(index)
    }

    fn list_bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    /// Retries a write left pending by an earlier failure. No-op when clean.
    fn flush(&mut self) -> Result<(), BookmarkError> {
        if !self.dirty {
            return Ok(());
        }
        self.persist()
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }
}
