//! Contracts the shell core requires from the platform web view.
//!
//! The shell never touches rendering internals: it reads and writes a
//! vertical offset, asks for loads and history moves, and receives
//! [`EngineEvent`]s back.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::navigation::NavigationPolicy;

/// The scrollable viewport showing rendered page content.
pub trait ContentSurface {
    fn vertical_offset(&self) -> f64;
    fn set_vertical_offset(&mut self, offset: f64);
    fn content_height(&self) -> f64;
    fn viewport_height(&self) -> f64;

    /// Largest offset that still shows content; negative when the page fits.
    fn max_scroll_offset(&self) -> f64 {
        self.content_height() - self.viewport_height()
    }
}

/// Loading and history side of the web view.
pub trait NavigationEngine {
    fn load(&mut self, url: &Url);
    fn go_back(&mut self);
    fn go_forward(&mut self);
    /// Answers the most recent [`EngineEvent::WillNavigate`].
    fn resolve_navigation(&mut self, policy: NavigationPolicy);
}

/// A complete web view as seen by the shell.
pub trait WebEngine: ContentSurface + NavigationEngine + Send {
    /// Returns signals raised since the last call.
    ///
    /// Platform hosts deliver these through the control loop instead and may
    /// keep the default.
    fn drain_events(&mut self) -> Vec<EngineEvent> {
        Vec::new()
    }
}

/// Signals raised by the web view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// The engine is about to commit a navigation and waits for a policy.
    WillNavigate { url: String },
    /// A navigation completed; the only source of back/forward availability.
    NavigationFinished {
        can_go_back: bool,
        can_go_forward: bool,
        title: Option<String>,
    },
    /// The user put a finger on the content.
    DragStarted,
    /// The user lifted the finger.
    DragEnded,
}
