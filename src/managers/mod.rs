// SeeSound state managers
// Managers own the stateful parts of the shell: auto-scroll, navigation, bookmarks.

pub mod auto_scroll_driver;
pub mod bookmark_manager;
pub mod navigation_manager;
