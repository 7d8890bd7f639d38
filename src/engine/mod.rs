// SeeSound web engine boundary
// Contracts for the opaque platform web view, plus an in-memory implementation.

pub mod contract;
pub mod headless;

pub use contract::{ContentSurface, EngineEvent, NavigationEngine, WebEngine};
pub use headless::HeadlessEngine;
