//! In-memory web view.
//!
//! `HeadlessEngine` keeps a history list and a fake page geometry so the
//! shell core can run without a platform view. It renders nothing.

use std::collections::{HashMap, VecDeque};

use url::Url;

use super::contract::{ContentSurface, EngineEvent, NavigationEngine, WebEngine};
use crate::types::navigation::NavigationPolicy;

/// Content height used for pages without an explicit override.
pub const DEFAULT_PAGE_HEIGHT: f64 = 4000.0;
/// Viewport height of a portrait phone.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingKind {
    Link,
    Back,
    Forward,
}

#[derive(Debug, Clone)]
struct PendingNavigation {
    url: String,
    kind: PendingKind,
}

/// Simulated web view with history and page geometry.
pub struct HeadlessEngine {
    history: Vec<Url>,
    index: Option<usize>,
    page_heights: HashMap<String, f64>,
    default_page_height: f64,
    content_height: f64,
    viewport_height: f64,
    offset: f64,
    dragging: bool,
    pending: Option<PendingNavigation>,
    events: VecDeque<EngineEvent>,
    loads: Vec<Url>,
}

impl HeadlessEngine {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            history: Vec::new(),
            index: None,
            page_heights: HashMap::new(),
            default_page_height: DEFAULT_PAGE_HEIGHT,
            content_height: 0.0,
            viewport_height,
            offset: 0.0,
            dragging: false,
            pending: None,
            events: VecDeque::new(),
            loads: Vec::new(),
        }
    }

    /// Sets the content height used for pages without an override.
    pub fn with_default_page_height(mut self, height: f64) -> Self {
        self.default_page_height = height;
        self
    }

    /// Gives one address its own content height.
    pub fn set_page_height(&mut self, url: &str, height: f64) {
        self.page_heights.insert(normalize_key(url), height);
    }

    /// Changes the height of the page currently shown (e.g. lazy content).
    pub fn set_content_height(&mut self, height: f64) {
        self.content_height = height;
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    /// Address of the committed page.
    pub fn current_url(&self) -> Option<&Url> {
        self.index.and_then(|i| self.history.get(i))
    }

    /// Every address passed to `load`, in order.
    pub fn loads(&self) -> &[Url] {
        &self.loads
    }

    pub fn load_count(&self) -> usize {
        self.loads.len()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Simulates the user tapping a link; the engine then waits for a policy.
    pub fn click_link(&mut self, url: &str) {
        self.request(url.to_string(), PendingKind::Link);
    }

    /// Simulates a finger touching the content.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
        self.events.push_back(EngineEvent::DragStarted);
    }

    /// Moves the content under the finger, clamped to the page.
    pub fn drag_by(&mut self, dy: f64) {
        let max = self.max_scroll_offset().max(0.0);
        self.offset = (self.offset + dy).clamp(0.0, max);
    }

    /// Simulates the finger lifting.
    pub fn end_drag(&mut self) {
        self.dragging = false;
        self.events.push_back(EngineEvent::DragEnded);
    }

    fn request(&mut self, url: String, kind: PendingKind) {
        self.events.push_back(EngineEvent::WillNavigate { url: url.clone() });
        self.pending = Some(PendingNavigation { url, kind });
    }

    fn height_for(&self, url: &Url) -> f64 {
        self.page_heights
            .get(&normalize_key(url.as_str()))
            .copied()
            .unwrap_or(self.default_page_height)
    }

    fn show(&mut self, index: usize) {
        self.index = Some(index);
        self.offset = 0.0;
        self.content_height = self.history.get(index).map(|u| self.height_for(u)).unwrap_or(0.0);
        let title = self.history.get(index).map(title_for);
        self.events.push_back(EngineEvent::NavigationFinished {
            can_go_back: index > 0,
            can_go_forward: index + 1 < self.history.len(),
            title,
        });
    }

    fn push(&mut self, url: Url) {
        if let Some(i) = self.index {
            self.history.truncate(i + 1);
        }
        self.history.push(url);
        self.show(self.history.len() - 1);
    }
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_HEIGHT)
    }
}

fn normalize_key(url: &str) -> String {
    Url::parse(url).map(|u| u.to_string()).unwrap_or_else(|_| url.to_string())
}

fn title_for(url: &Url) -> String {
    url.host_str().map(str::to_string).unwrap_or_else(|| url.to_string())
}

impl ContentSurface for HeadlessEngine {
    fn vertical_offset(&self) -> f64 {
        self.offset
    }

    fn set_vertical_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    fn content_height(&self) -> f64 {
        self.content_height
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }
}

impl NavigationEngine for HeadlessEngine {
    fn load(&mut self, url: &Url) {
        self.loads.push(url.clone());
        self.pending = None;
        self.push(url.clone());
    }

    fn go_back(&mut self) {
        if let Some(i) = self.index.filter(|i| *i > 0) {
            let target = self.history[i - 1].to_string();
            self.request(target, PendingKind::Back);
        }
    }

    fn go_forward(&mut self) {
        if let Some(i) = self.index.filter(|i| i + 1 < self.history.len()) {
            let target = self.history[i + 1].to_string();
            self.request(target, PendingKind::Forward);
        }
    }

    fn resolve_navigation(&mut self, policy: NavigationPolicy) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        if policy == NavigationPolicy::Cancel {
            log::debug!("headless engine: navigation to {} cancelled", pending.url);
            return;
        }
        match pending.kind {
            PendingKind::Link => match Url::parse(&pending.url) {
                Ok(url) => self.push(url),
                Err(e) => log::warn!("headless engine: cannot open {}: {}", pending.url, e),
            },
            PendingKind::Back => {
                if let Some(i) = self.index.filter(|i| *i > 0) {
                    self.show(i - 1);
                }
            }
            PendingKind::Forward => {
                if let Some(i) = self.index.filter(|i| i + 1 < self.history.len()) {
                    self.show(i + 1);
                }
            }
        }
    }
}

impl WebEngine for HeadlessEngine {
    fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain(..).collect()
    }
}
