use thiserror::Error;

// === NavigationError ===

/// Errors related to address entry and navigation.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// The typed address could not be parsed as a URL.
    #[error("Malformed address: {0}")]
    MalformedAddress(String),
    /// Navigation to the blank placeholder address was suppressed.
    #[error("Navigation to blank placeholder suppressed")]
    BlankNavigationAttempt,
}

// === ScrollError ===

/// Errors produced while driving auto-scroll.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScrollError {
    /// A frame tick computed a NaN or infinite offset; the frame is skipped.
    #[error("Non-finite scroll offset (offset {offset}, delta {delta}, max {max})")]
    NonFiniteOffset { offset: f64, delta: f64, max: f64 },
}

// === StorageError ===

/// Errors from the key-value blob store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database operation failed.
    #[error("Storage database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// Failed to serialize or deserialize a stored value.
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The backing store refused the write.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

// === BookmarkError ===

/// Errors related to bookmark management operations.
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// No bookmark exists at the given list index.
    #[error("Invalid bookmark index: {0}")]
    InvalidIndex(usize),
    /// Bookmark with the given ID was not found.
    #[error("Bookmark not found: {0}")]
    NotFound(String),
    /// Writing the bookmark list failed; the in-memory list is still current.
    #[error("Bookmark persistence failed: {0}")]
    Persistence(#[from] StorageError),
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === ShellError ===

/// Any error surfaced by a shell command.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error(transparent)]
    Bookmark(#[from] BookmarkError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
