//! Shell state for SeeSound.
//!
//! One owned object holds every flag the browser chrome shows: address bar
//! text, speed slider, play/pause, panel visibility. It also owns the
//! navigation, scroll and bookmark managers. UI commands, engine events and
//! frame ticks all arrive here as direct method calls on the control task.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::engine::{ContentSurface, EngineEvent, WebEngine};
use crate::managers::auto_scroll_driver::AutoScrollDriver;
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use crate::managers::navigation_manager::{normalize_address, NavigationManager};
use crate::services::frame_clock::FrameScheduler;
use crate::types::bookmark::Bookmark;
use crate::types::errors::{BookmarkError, NavigationError, ShellError};
use crate::types::navigation::{NavigateOutcome, NavigationPolicy};
use crate::types::scroll::{clamp_speed, FrameTick, ScrollState, TickOutcome};
use crate::types::settings::{ScrollSettings, ShellSettings};

/// Fallback when the configured home address is unusable.
const FALLBACK_HOME: &str = "https://www.google.com/";

/// Everything the chrome renders, in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellSnapshot {
    pub address: String,
    pub address_text: String,
    pub title: Option<String>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub is_scrolling: bool,
    pub scroll_state: ScrollState,
    pub speed: f64,
    pub controls_visible: bool,
    pub vertical_offset: f64,
    pub max_scroll_offset: f64,
    pub bookmark_count: usize,
    pub bookmarks_dirty: bool,
}

/// The browser shell with a single page.
pub struct Shell<E: WebEngine, S: FrameScheduler> {
    engine: E,
    navigation: NavigationManager,
    driver: AutoScrollDriver<S>,
    bookmarks: BookmarkManager,
    scroll_settings: ScrollSettings,
    /// A back/forward request is waiting for the engine's `WillNavigate`.
    history_move_pending: bool,
    address_text: String,
    speed: f64,
    controls_visible: bool,
}

impl<E: WebEngine, S: FrameScheduler> Shell<E, S> {
    /// Builds the shell and loads the configured home address.
    ///
    /// An unusable configured home falls back to the built-in one.
    pub fn new(
        mut engine: E,
        scheduler: S,
        bookmarks: BookmarkManager,
        settings: &ShellSettings,
    ) -> Result<Self, ShellError> {
        let home = match normalize_address(&settings.general.home_url) {
            Ok(Some(url)) => url,
            other => {
                log::warn!(
                    "home address '{}' unusable ({:?}), using {}",
                    settings.general.home_url,
                    other.err(),
                    FALLBACK_HOME
                );
                Url::parse(FALLBACK_HOME)
                    .map_err(|e| NavigationError::MalformedAddress(format!("{}: {}", FALLBACK_HOME, e)))?
            }
        };

        let scroll_settings = settings.scroll.sanitized();
        if scroll_settings != settings.scroll {
            log::warn!(
                "scroll settings out of range ({:?}), using {:?}",
                settings.scroll.validate().err(),
                scroll_settings
            );
        }
        let speed = clamp_speed(scroll_settings.default_speed);
        let mut driver = AutoScrollDriver::with_frame_rate(scheduler, scroll_settings.preferred_frame_rate);
        driver.update_speed(speed);

        engine.load(&home);
        log::info!("shell started at {}", home);

        let mut shell = Self {
            engine,
            address_text: home.to_string(),
            navigation: NavigationManager::new(home),
            driver,
            bookmarks,
            scroll_settings,
            history_move_pending: false,
            speed,
            controls_visible: settings.general.controls_visible,
        };
        shell.pump_engine_events();
        Ok(shell)
    }

    // ─── Address bar ───

    /// Replaces the address bar text without navigating.
    pub fn set_address_text(&mut self, text: &str) {
        self.address_text = text.to_string();
    }

    /// Navigates to typed text.
    ///
    /// A successful load ends any scroll session since the surface now shows
    /// another page. A malformed address stays in the address bar for the
    /// user to fix; the blank placeholder never does.
    pub fn navigate(&mut self, text: &str) -> Result<NavigateOutcome, ShellError> {
        match self.navigation.navigate(text, &mut self.engine) {
            Ok(NavigateOutcome::Loaded(url)) => {
                self.history_move_pending = false;
                self.driver.surface_replaced();
                self.address_text = url.to_string();
                Ok(NavigateOutcome::Loaded(url))
            }
            Ok(NavigateOutcome::Unchanged) => {
                self.address_text = self.navigation.current_address().to_string();
                Ok(NavigateOutcome::Unchanged)
            }
            Ok(NavigateOutcome::Empty) => Ok(NavigateOutcome::Empty),
            Err(NavigationError::BlankNavigationAttempt) => {
                self.address_text = self.navigation.current_address().to_string();
                Err(NavigationError::BlankNavigationAttempt.into())
            }
            Err(e) => {
                self.address_text = text.to_string();
                Err(e.into())
            }
        }
    }

    /// Asks the engine to go back. Returns whether a request was issued.
    ///
    /// The scroll session ends only once the engine's `WillNavigate` for the
    /// move is allowed. Signals already queued are handled first so they
    /// cannot be mistaken for the move's own.
    pub fn go_back(&mut self) -> bool {
        self.pump_engine_events();
        let issued = self.navigation.go_back(&mut self.engine);
        self.history_move_pending |= issued;
        issued
    }

    /// Asks the engine to go forward. Returns whether a request was issued.
    pub fn go_forward(&mut self) -> bool {
        self.pump_engine_events();
        let issued = self.navigation.go_forward(&mut self.engine);
        self.history_move_pending |= issued;
        issued
    }

    // ─── Auto-scroll ───

    /// Play/pause. Returns the new on/off state.
    pub fn toggle_scrolling(&mut self) -> bool {
        if self.driver.is_active() {
            self.driver.stop();
        } else {
            self.driver.start(self.speed);
        }
        self.driver.is_active()
    }

    /// Turns auto-scroll off if it was on.
    pub fn stop_scrolling(&mut self) {
        self.driver.stop();
    }

    /// Moves the speed slider. The value snaps to the slider step and range.
    pub fn set_speed(&mut self, speed: f64) -> f64 {
        if !speed.is_finite() {
            return self.speed;
        }
        let step = self.scroll_settings.slider_step;
        let snapped = if step > 0.0 { (speed / step).round() * step } else { speed };
        self.apply_speed(snapped)
    }

    /// The `+` button.
    pub fn increase_speed(&mut self) -> f64 {
        self.apply_speed(self.speed + self.scroll_settings.speed_step)
    }

    /// The `-` button.
    pub fn decrease_speed(&mut self) -> f64 {
        self.apply_speed(self.speed - self.scroll_settings.speed_step)
    }

    fn apply_speed(&mut self, speed: f64) -> f64 {
        self.speed = clamp_speed(speed);
        self.driver.update_speed(self.speed);
        self.speed
    }

    /// Advances the page for one display frame.
    pub fn on_frame(&mut self, tick: FrameTick) -> TickOutcome {
        let outcome = self.driver.tick(tick, &mut self.engine);
        if outcome == TickOutcome::Finished {
            log::info!("auto-scroll finished at end of {}", self.navigation.current_address());
        }
        outcome
    }

    // ─── Engine signals ───

    /// Applies one engine signal. Returns the policy for `WillNavigate`.
    pub fn handle_engine_event(&mut self, event: EngineEvent) -> Option<NavigationPolicy> {
        match event {
            EngineEvent::WillNavigate { url } => {
                let policy = self.navigation.will_navigate(&url);
                let history_move = std::mem::take(&mut self.history_move_pending);
                if policy == NavigationPolicy::Allow {
                    self.address_text = self.navigation.current_address().to_string();
                    if history_move {
                        self.driver.surface_replaced();
                    }
                }
                self.engine.resolve_navigation(policy);
                Some(policy)
            }
            EngineEvent::NavigationFinished {
                can_go_back,
                can_go_forward,
                title,
            } => {
                // A move the engine dropped without asking never commits.
                self.history_move_pending = false;
                self.navigation.navigation_finished(can_go_back, can_go_forward, title);
                None
            }
            EngineEvent::DragStarted => {
                self.driver.drag_started();
                None
            }
            EngineEvent::DragEnded => {
                self.driver.drag_ended();
                None
            }
        }
    }

    /// Feeds queued engine signals back in until the engine goes quiet.
    ///
    /// Returns how many signals were handled.
    pub fn pump_engine_events(&mut self) -> usize {
        let mut handled = 0;
        loop {
            let events = self.engine.drain_events();
            if events.is_empty() {
                return handled;
            }
            for event in events {
                self.handle_engine_event(event);
                handled += 1;
            }
        }
    }

    // ─── Bookmarks ───

    /// Bookmarks the current address under `title`.
    pub fn add_bookmark(&mut self, title: &str) -> Result<String, BookmarkError> {
        let url = self.navigation.current_address().to_string();
        self.bookmarks.add_bookmark(title, &url)
    }

    pub fn remove_bookmark(&mut self, index: usize) -> Result<Bookmark, BookmarkError> {
        self.bookmarks.remove_at(index)
    }

    /// Navigates to the bookmark at `index`.
    pub fn open_bookmark(&mut self, index: usize) -> Result<NavigateOutcome, ShellError> {
        let url = self
            .bookmarks
            .get(index)
            .map(|b| b.url.clone())
            .ok_or(BookmarkError::InvalidIndex(index))?;
        self.navigate(&url)
    }

    // ─── Chrome ───

    /// Shows or hides the address/speed panel. Returns the new visibility.
    pub fn toggle_controls(&mut self) -> bool {
        self.controls_visible = !self.controls_visible;
        self.controls_visible
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        ShellSnapshot {
            address: self.navigation.current_address().to_string(),
            address_text: self.address_text.clone(),
            title: self.navigation.title().map(str::to_string),
            can_go_back: self.navigation.can_go_back(),
            can_go_forward: self.navigation.can_go_forward(),
            is_scrolling: self.driver.is_active(),
            scroll_state: self.driver.state(),
            speed: self.speed,
            controls_visible: self.controls_visible,
            vertical_offset: self.engine.vertical_offset(),
            max_scroll_offset: self.engine.max_scroll_offset(),
            bookmark_count: self.bookmarks.list_bookmarks().len(),
            bookmarks_dirty: self.bookmarks.is_dirty(),
        }
    }

    pub fn address_text(&self) -> &str {
        &self.address_text
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn navigation(&self) -> &NavigationManager {
        &self.navigation
    }

    pub fn driver(&self) -> &AutoScrollDriver<S> {
        &self.driver
    }

    pub fn bookmarks(&self) -> &BookmarkManager {
        &self.bookmarks
    }

    pub fn bookmarks_mut(&mut self) -> &mut BookmarkManager {
        &mut self.bookmarks
    }
}
