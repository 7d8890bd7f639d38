//! Integration-level unit tests for the SettingsEngine public API.
//!
//! These tests exercise the SettingsEngine through its public trait interface,
//! validating default loading, value persistence, and reset behavior.

use seesound::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use seesound::types::errors::SettingsError;
use seesound::types::settings::{ScrollSettings, ShellSettings};
use tempfile::TempDir;

/// Helper: create a SettingsEngine backed by a temp directory that lives for the
/// duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

/// A missing file loads as the built-in defaults.
#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(
        settings,
        ShellSettings::default(),
        "Loading without a config file must return default settings"
    );
    assert_eq!(settings.scroll.default_speed, 50.0);
    assert_eq!(settings.general.home_url, "https://www.google.com");
}

/// A change made through `set_value` is on disk for the next engine instance.
#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine
            .set_value("scroll.default_speed", serde_json::json!(120.0))
            .unwrap();
        engine
            .set_value("general.home_url", serde_json::json!("https://example.org"))
            .unwrap();
    }

    let mut engine = engine_in_temp(&dir);
    let settings = engine.load().unwrap();
    assert_eq!(settings.scroll.default_speed, 120.0);
    assert_eq!(settings.general.home_url, "https://example.org");
}

/// Reset brings back defaults in memory and on disk.
#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    engine
        .set_value("general.controls_visible", serde_json::json!(false))
        .unwrap();
    assert!(!engine.get_settings().general.controls_visible);

    engine.reset().unwrap();
    assert_eq!(engine.get_settings(), &ShellSettings::default());

    let mut reloaded = engine_in_temp(&dir);
    assert_eq!(reloaded.load().unwrap(), ShellSettings::default());
}

/// Keys that name no setting are rejected as invalid keys.
#[test]
fn test_unknown_key_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    let err = engine
        .set_value("scroll.turbo", serde_json::json!(true))
        .unwrap_err();
    assert!(matches!(err, SettingsError::InvalidKey(_)));

    let err = engine.set_value("", serde_json::json!(1)).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidKey(_)));
}

/// A file that is not JSON fails to load.
#[test]
fn test_malformed_file_is_serialization_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
    let mut engine = engine_in_temp(&dir);
    assert!(matches!(engine.load(), Err(SettingsError::SerializationError(_))));
}

/// Files written by an older build without a `scroll` section still load.
#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"general":{"home_url":"https://example.com"}}"#,
    )
    .unwrap();
    let mut engine = engine_in_temp(&dir);
    let settings = engine.load().unwrap();
    assert_eq!(settings.general.home_url, "https://example.com");
    assert!(settings.general.controls_visible);
    assert_eq!(settings.scroll, ScrollSettings::default());
}

/// The override path is the one reported back.
#[test]
fn test_config_path_override_is_reported() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in_temp(&dir);
    assert!(engine.get_config_path().ends_with("settings.json"));
    assert!(engine.get_config_path().starts_with(&*dir.path().to_string_lossy()));
}

/// Frame rates outside `1..=240` are refused and the old value stays.
#[test]
fn test_out_of_range_frame_rate_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    for rate in [0u64, 241, 4_000_000_000] {
        let err = engine
            .set_value("scroll.preferred_frame_rate", serde_json::json!(rate))
            .unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue(_)), "rate {}", rate);
    }
    engine
        .set_value("scroll.preferred_frame_rate", serde_json::json!(240))
        .unwrap();
    assert_eq!(engine.get_settings().scroll.preferred_frame_rate, 240);
}

/// Speed and slider steps must lie in `(0, 500]`.
#[test]
fn test_out_of_range_steps_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    for key in ["scroll.speed_step", "scroll.slider_step"] {
        for bad in [0.0, -10.0, 1000.0] {
            let err = engine.set_value(key, serde_json::json!(bad)).unwrap_err();
            assert!(matches!(err, SettingsError::InvalidValue(_)), "{} = {}", key, bad);
        }
    }
    assert_eq!(engine.get_settings().scroll, ScrollSettings::default());

    let mut reloaded = engine_in_temp(&dir);
    assert_eq!(reloaded.load().unwrap().scroll, ScrollSettings::default());
}

/// Hand-edited files with bad steps or rates are repaired for use.
#[test]
fn test_sanitized_replaces_out_of_range_values() {
    let bad = ScrollSettings {
        default_speed: 80.0,
        speed_step: -5.0,
        slider_step: 1000.0,
        preferred_frame_rate: 4_000_000_000,
    };
    assert!(bad.validate().is_err());
    let fixed = bad.sanitized();
    assert_eq!(fixed.default_speed, 80.0);
    assert_eq!(fixed.speed_step, 50.0);
    assert_eq!(fixed.slider_step, 10.0);
    assert_eq!(fixed.preferred_frame_rate, 240);
    assert!(fixed.validate().is_ok());
}
