//! Navigation Manager for SeeSound.
//!
//! Holds the single authoritative current address and keeps it in sync
//! across typed input, engine-originated navigation, and history moves.
//! Back/forward availability only ever comes from the engine.

use url::Url;

use crate::engine::NavigationEngine;
use crate::types::errors::NavigationError;
use crate::types::navigation::{is_blank, NavigateOutcome, NavigationPolicy, DEFAULT_SCHEME};

/// Turns address bar text into a URL.
///
/// Returns `Ok(None)` for blank input. Text without `://` gets the default
/// secure scheme.
pub fn normalize_address(raw: &str) -> Result<Option<Url>, NavigationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if is_blank(trimmed) {
        return Err(NavigationError::BlankNavigationAttempt);
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME, trimmed)
    };

    let url = Url::parse(&candidate)
        .map_err(|e| NavigationError::MalformedAddress(format!("{}: {}", trimmed, e)))?;
    if is_blank(url.as_str()) {
        return Err(NavigationError::BlankNavigationAttempt);
    }
    Ok(Some(url))
}

/// Current address plus engine-reported history flags.
#[derive(Debug, Clone)]
pub struct NavigationManager {
    current: Url,
    title: Option<String>,
    can_go_back: bool,
    can_go_forward: bool,
}

impl NavigationManager {
    /// Starts at `home`. The engine is not asked to load it here.
    pub fn new(home: Url) -> Self {
        Self {
            current: home,
            title: None,
            can_go_back: false,
            can_go_forward: false,
        }
    }

    /// Navigates to typed text.
    ///
    /// Empty input and the current address are no-ops; a bad address leaves
    /// every piece of state untouched.
    pub fn navigate(
        &mut self,
        raw: &str,
        engine: &mut dyn NavigationEngine,
    ) -> Result<NavigateOutcome, NavigationError> {
        let url = match normalize_address(raw) {
            Ok(Some(url)) => url,
            Ok(None) => return Ok(NavigateOutcome::Empty),
            Err(e) => {
                log::warn!("navigation rejected: {}", e);
                return Err(e);
            }
        };

        if url == self.current {
            log::debug!("already at {}, not reloading", url);
            return Ok(NavigateOutcome::Unchanged);
        }

        log::debug!("navigating to {}", url);
        self.current = url.clone();
        self.title = None;
        engine.load(&url);
        Ok(NavigateOutcome::Loaded(url))
    }

    /// Decision point for navigation the engine started on its own.
    pub fn will_navigate(&mut self, url: &str) -> NavigationPolicy {
        if is_blank(url) {
            log::warn!("cancelled navigation to blank placeholder");
            return NavigationPolicy::Cancel;
        }
        match Url::parse(url) {
            Ok(parsed) => {
                if parsed != self.current {
                    log::debug!("engine navigating to {}", parsed);
                    self.current = parsed;
                    self.title = None;
                }
            }
            Err(e) => log::debug!("engine navigating to unparseable {}: {}", url, e),
        }
        NavigationPolicy::Allow
    }

    /// Records the engine's view of history after a navigation completes.
    pub fn navigation_finished(&mut self, can_go_back: bool, can_go_forward: bool, title: Option<String>) {
        self.can_go_back = can_go_back;
        self.can_go_forward = can_go_forward;
        if title.is_some() {
            self.title = title;
        }
    }

    /// Asks the engine to go back. Returns false when history says it can't.
    pub fn go_back(&mut self, engine: &mut dyn NavigationEngine) -> bool {
        if !self.can_go_back {
            return false;
        }
        engine.go_back();
        true
    }

    /// Asks the engine to go forward. Returns false when history says it can't.
    pub fn go_forward(&mut self, engine: &mut dyn NavigationEngine) -> bool {
        if !self.can_go_forward {
            return false;
        }
        engine.go_forward();
        true
    }

    pub fn current_address(&self) -> &Url {
        &self.current
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn can_go_back(&self) -> bool {
        self.can_go_back
    }

    pub fn can_go_forward(&self) -> bool {
        self.can_go_forward
    }
}
