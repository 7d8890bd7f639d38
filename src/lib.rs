//! SeeSound: a minimal browser shell core with auto-scroll and bookmarks.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod database;
pub mod engine;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod shell;
pub mod types;
