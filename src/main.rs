//! SeeSound console demo.
//!
//! Runs the shell core against the headless engine: loads a page, auto-scrolls
//! it to the end on the real frame clock, drags mid-way, and bookmarks it.
//! Set `RUST_LOG=debug` to watch the state transitions.

use std::time::Duration;

use serde_json::json;

use seesound::app::{App, Notification};
use seesound::database::MemoryKvStore;
use seesound::engine::HeadlessEngine;
use seesound::services::settings_engine::SettingsEngine;

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!();
    println!("SeeSound v{} (demo mode)", env!("CARGO_PKG_VERSION"));
    println!();

    let mut engine = HeadlessEngine::default();
    // 1600 content - 800 viewport leaves 800 units to scroll.
    engine.set_page_height("https://example.com/", 1600.0);

    let config = std::env::temp_dir().join("seesound-demo").join("settings.json");
    let settings = SettingsEngine::new(Some(config.to_string_lossy().to_string()));
    let (app, handle, mut notifications) = App::new(engine, settings, Box::new(MemoryKvStore::new()))?;
    let control = tokio::spawn(app.run());

    section("Navigation");
    let result = handle.call("navigate", json!({"url": "example.com"})).await?;
    println!("  navigate example.com -> {}", result);
    let result = handle.call("navigate", json!({"url": "   "})).await?;
    println!("  navigate <blank input> -> {}", result);

    section("Auto-scroll");
    handle.call("scroll.set_speed", json!({"speed": 400})).await?;
    let result = handle.call("scroll.toggle", json!({})).await?;
    println!("  toggle -> {}", result);

    tokio::time::sleep(Duration::from_millis(500)).await;
    handle.call("surface.drag_start", json!({})).await?;
    let state = handle.call("state", json!({})).await?;
    println!("  dragging: state={} offset={}", state["scroll_state"], state["vertical_offset"]);
    tokio::time::sleep(Duration::from_millis(200)).await;
    handle.call("surface.drag_end", json!({})).await?;
    println!("  released, resuming at {}", handle.call("state", json!({})).await?["speed"]);

    match tokio::time::timeout(Duration::from_secs(10), notifications.recv()).await {
        Ok(Some(Notification::ScrollFinished { address })) => println!("  reached end of {}", address),
        _ => println!("  scroll did not finish in time"),
    }

    section("Bookmarks");
    handle.call("bookmark.add", json!({"title": "Example"})).await?;
    let list = handle.call("bookmark.list", json!({})).await?;
    println!("  {}", list);

    handle.shutdown().await;
    let shell = control.await?;
    println!();
    println!("  final state: {:?}", shell.snapshot());
    Ok(())
}
