use seesound::types::errors::*;

// === NavigationError Tests ===

#[test]
fn navigation_error_malformed_display() {
    let err = NavigationError::MalformedAddress("exa mple".to_string());
    assert_eq!(err.to_string(), "Malformed address: exa mple");
}

#[test]
fn navigation_error_blank_display() {
    assert_eq!(
        NavigationError::BlankNavigationAttempt.to_string(),
        "Navigation to blank placeholder suppressed"
    );
}

// === ScrollError Tests ===

#[test]
fn scroll_error_names_the_values() {
    let err = ScrollError::NonFiniteOffset {
        offset: f64::NAN,
        delta: 1.0,
        max: 200.0,
    };
    let text = err.to_string();
    assert!(text.contains("NaN"), "{}", text);
    assert!(text.contains("200"), "{}", text);
}

// === StorageError Tests ===

#[test]
fn storage_error_from_serde_json() {
    let json_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
    let err: StorageError = json_err.into();
    assert!(matches!(err, StorageError::Serialization(_)));
    assert!(err.to_string().starts_with("Storage serialization error"));
}

#[test]
fn storage_error_unavailable_display() {
    let err = StorageError::Unavailable("disk full".to_string());
    assert_eq!(err.to_string(), "Storage unavailable: disk full");
}

// === BookmarkError Tests ===

#[test]
fn bookmark_error_display_variants() {
    assert_eq!(BookmarkError::InvalidIndex(7).to_string(), "Invalid bookmark index: 7");
    assert_eq!(
        BookmarkError::NotFound("bm-1".to_string()).to_string(),
        "Bookmark not found: bm-1"
    );
}

#[test]
fn bookmark_error_wraps_storage_error() {
    let err: BookmarkError = StorageError::Unavailable("locked".to_string()).into();
    assert!(matches!(err, BookmarkError::Persistence(_)));
    assert_eq!(
        err.to_string(),
        "Bookmark persistence failed: Storage unavailable: locked"
    );
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("denied".to_string()).to_string(),
        "Settings I/O error: denied"
    );
    assert_eq!(
        SettingsError::InvalidKey("a.b".to_string()).to_string(),
        "Invalid settings key: a.b"
    );
    assert_eq!(
        SettingsError::InvalidValue("x".to_string()).to_string(),
        "Invalid settings value: x"
    );
}

// === ShellError Tests ===

#[test]
fn shell_error_is_transparent() {
    let err: ShellError = NavigationError::BlankNavigationAttempt.into();
    assert_eq!(err.to_string(), "Navigation to blank placeholder suppressed");

    let err: ShellError = BookmarkError::InvalidIndex(3).into();
    assert_eq!(err.to_string(), "Invalid bookmark index: 3");
}

#[test]
fn shell_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(ShellError::from(BookmarkError::InvalidIndex(0)));
    assert!(!err.to_string().is_empty());
}
