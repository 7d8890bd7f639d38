use serde::{Deserialize, Serialize};
use url::Url;

/// Placeholder address the engine may try to commit; never becomes current.
pub const BLANK_ADDRESS: &str = "about:blank";

/// Scheme prepended to typed addresses that carry none.
pub const DEFAULT_SCHEME: &str = "https://";

/// Answer to the engine's `will_navigate` decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationPolicy {
    Allow,
    Cancel,
}

/// Result of a user-issued navigate command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigateOutcome {
    /// Input was empty or whitespace.
    Empty,
    /// Input resolved to the address already displayed.
    Unchanged,
    /// The engine was asked to load this address.
    Loaded(Url),
}

/// Returns true for the blank placeholder address.
pub fn is_blank(url: &str) -> bool {
    url.trim().eq_ignore_ascii_case(BLANK_ADDRESS)
}
