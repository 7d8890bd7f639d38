use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved page. Persisted as `{id, title, url}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
}

impl Bookmark {
    /// Creates a bookmark with a fresh v4 id.
    ///
    /// A blank title falls back to the URL so the list never shows an empty row.
    pub fn new(title: &str, url: &str) -> Self {
        let title = title.trim();
        Self {
            id: Uuid::new_v4().to_string(),
            title: if title.is_empty() { url.to_string() } else { title.to_string() },
            url: url.to_string(),
        }
    }
}
