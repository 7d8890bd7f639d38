//! Tests for the in-memory HeadlessEngine.

use url::Url;

use seesound::engine::{
    ContentSurface, EngineEvent, HeadlessEngine, NavigationEngine, WebEngine,
};
use seesound::types::navigation::NavigationPolicy;

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

/// Loading sets page geometry and queues a finished signal.
#[test]
fn test_load_sets_geometry_and_reports_finish() {
    let mut engine = HeadlessEngine::new(800.0).with_default_page_height(3000.0);
    engine.set_page_height("https://short.com", 900.0);

    engine.load(&url("https://example.com/"));
    assert_eq!(engine.content_height(), 3000.0);
    assert_eq!(engine.max_scroll_offset(), 2200.0);
    assert_eq!(
        engine.drain_events(),
        vec![EngineEvent::NavigationFinished {
            can_go_back: false,
            can_go_forward: false,
            title: Some("example.com".to_string()),
        }]
    );

    engine.set_vertical_offset(500.0);
    engine.load(&url("https://short.com/"));
    assert_eq!(engine.vertical_offset(), 0.0);
    assert_eq!(engine.max_scroll_offset(), 100.0);
    assert_eq!(engine.load_count(), 2);
}

/// A back move only commits after it is allowed.
#[test]
fn test_back_waits_for_policy() {
    let mut engine = HeadlessEngine::default();
    engine.load(&url("https://a.com/"));
    engine.load(&url("https://b.com/"));
    engine.drain_events();

    engine.go_back();
    assert_eq!(
        engine.drain_events(),
        vec![EngineEvent::WillNavigate {
            url: "https://a.com/".to_string()
        }]
    );
    assert_eq!(engine.current_url().map(Url::as_str), Some("https://b.com/"));

    engine.resolve_navigation(NavigationPolicy::Allow);
    assert_eq!(engine.current_url().map(Url::as_str), Some("https://a.com/"));
    let events = engine.drain_events();
    assert!(matches!(
        events.as_slice(),
        [EngineEvent::NavigationFinished { can_go_back: false, can_go_forward: true, .. }]
    ));
}

/// A cancelled link leaves the engine on the current page.
#[test]
fn test_cancelled_link_stays_put() {
    let mut engine = HeadlessEngine::default();
    engine.load(&url("https://a.com/"));
    engine.drain_events();

    engine.click_link("about:blank");
    engine.resolve_navigation(NavigationPolicy::Cancel);
    assert_eq!(engine.current_url().map(Url::as_str), Some("https://a.com/"));
    assert_eq!(engine.drain_events().len(), 1);
}

/// Loading a page drops the forward history.
#[test]
fn test_load_truncates_forward_history() {
    let mut engine = HeadlessEngine::default();
    engine.load(&url("https://a.com/"));
    engine.load(&url("https://b.com/"));
    engine.go_back();
    engine.resolve_navigation(NavigationPolicy::Allow);
    engine.load(&url("https://c.com/"));
    engine.drain_events();

    engine.go_forward();
    assert!(engine.drain_events().is_empty(), "no forward entry after a new load");
}

/// Drags emit start and end signals and clamp the offset.
#[test]
fn test_drag_emits_events_and_clamps() {
    let mut engine = HeadlessEngine::new(800.0).with_default_page_height(1000.0);
    engine.load(&url("https://a.com/"));
    engine.drain_events();

    engine.begin_drag();
    assert!(engine.is_dragging());
    engine.drag_by(500.0);
    assert_eq!(engine.vertical_offset(), 200.0);
    engine.drag_by(-1000.0);
    assert_eq!(engine.vertical_offset(), 0.0);
    engine.end_drag();
    assert!(!engine.is_dragging());

    assert_eq!(
        engine.drain_events(),
        vec![EngineEvent::DragStarted, EngineEvent::DragEnded]
    );
}

/// Engine signals serialize with a snake_case `type` tag.
#[test]
fn test_engine_event_wire_format() {
    let json = serde_json::to_value(EngineEvent::WillNavigate {
        url: "https://a.com/".to_string(),
    })
    .unwrap();
    assert_eq!(json, serde_json::json!({"type": "will_navigate", "url": "https://a.com/"}));

    let parsed: EngineEvent = serde_json::from_str(r#"{"type":"drag_started"}"#).unwrap();
    assert_eq!(parsed, EngineEvent::DragStarted);
}
