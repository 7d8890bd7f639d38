//! SeeSound database layer.
//!
//! Provides SQLite connection management, schema migrations, and the
//! key-value blob store the bookmark list is persisted through.
//!
//! # Usage
//!
//! ```no_run
//! use seesound::database::{Database, KeyValueStore, SqliteKvStore};
//!
//! let db = Database::open("seesound.db").expect("failed to open database");
//! let mut store = SqliteKvStore::new(db);
//! store.put("bookmarks", b"[]").expect("write failed");
//! ```

pub mod connection;
pub mod kv_store;
pub mod migrations;

pub use connection::Database;
pub use kv_store::{KeyValueStore, MemoryKvStore, SqliteKvStore};
