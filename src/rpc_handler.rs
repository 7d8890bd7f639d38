//! RPC method handler for the SeeSound JSON protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested without stdin.
//! `handle_method` runs on the control task and calls straight into the
//! [`Shell`]; engine signals raised by a command are pumped before returning.

use std::io::Write;

use serde_json::{json, Value};

use crate::engine::{EngineEvent, WebEngine};
use crate::managers::bookmark_manager::BookmarkManagerTrait;
use crate::services::frame_clock::FrameScheduler;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::shell::Shell;
use crate::types::navigation::NavigateOutcome;

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn index_param(params: &Value) -> Result<usize, String> {
    params
        .get("index")
        .and_then(|v| v.as_u64())
        .map(|i| i as usize)
        .ok_or_else(|| "missing index".to_string())
}

fn outcome_json(outcome: &NavigateOutcome) -> Value {
    match outcome {
        NavigateOutcome::Empty => json!({"navigated": false, "reason": "empty"}),
        NavigateOutcome::Unchanged => json!({"navigated": false, "reason": "unchanged"}),
        NavigateOutcome::Loaded(url) => json!({"navigated": true, "url": url.as_str()}),
    }
}

fn snapshot_json<E: WebEngine, S: FrameScheduler>(shell: &Shell<E, S>) -> Result<Value, String> {
    serde_json::to_value(shell.snapshot()).map_err(|e| e.to_string())
}

/// Writes one protocol line and flushes it.
///
/// A failure means the client is gone; callers stop serving.
pub fn write_line<W: Write>(out: &mut W, line: &Value) -> std::io::Result<()> {
    writeln!(out, "{}", line)?;
    out.flush()
}

/// Dispatch a method call to the shell.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method<E: WebEngine, S: FrameScheduler>(
    shell: &mut Shell<E, S>,
    settings: &mut SettingsEngine,
    method: &str,
    params: &Value,
) -> Result<Value, String> {
    let result = dispatch(shell, settings, method, params);
    shell.pump_engine_events();
    result
}

fn dispatch<E: WebEngine, S: FrameScheduler>(
    shell: &mut Shell<E, S>,
    settings: &mut SettingsEngine,
    method: &str,
    params: &Value,
) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),
        "state" => snapshot_json(shell),

        // ─── Address ───
        "navigate" => {
            let text = str_param(params, "url")?;
            let outcome = shell.navigate(text).map_err(|e| e.to_string())?;
            Ok(outcome_json(&outcome))
        }
        "address.set" => {
            let text = str_param(params, "text")?;
            shell.set_address_text(text);
            Ok(json!({"address_text": shell.address_text()}))
        }
        "nav.back" => Ok(json!({"requested": shell.go_back()})),
        "nav.forward" => Ok(json!({"requested": shell.go_forward()})),

        // ─── Scrolling ───
        "scroll.toggle" => Ok(json!({"is_scrolling": shell.toggle_scrolling()})),
        "scroll.set_speed" => {
            let speed = params
                .get("speed")
                .and_then(|v| v.as_f64())
                .ok_or("missing speed")?;
            Ok(json!({"speed": shell.set_speed(speed)}))
        }
        "scroll.faster" => Ok(json!({"speed": shell.increase_speed()})),
        "scroll.slower" => Ok(json!({"speed": shell.decrease_speed()})),

        // ─── Surface ───
        "surface.drag_start" => {
            shell.handle_engine_event(EngineEvent::DragStarted);
            snapshot_json(shell)
        }
        "surface.drag_end" => {
            shell.handle_engine_event(EngineEvent::DragEnded);
            snapshot_json(shell)
        }

        // ─── Bookmarks ───
        "bookmark.add" => {
            let title = params.get("title").and_then(|v| v.as_str()).unwrap_or("");
            let id = shell.add_bookmark(title).map_err(|e| e.to_string())?;
            Ok(json!({"id": id, "count": shell.bookmarks().list_bookmarks().len()}))
        }
        "bookmark.list" => {
            serde_json::to_value(shell.bookmarks().list_bookmarks()).map_err(|e| e.to_string())
        }
        "bookmark.delete" => {
            let index = index_param(params)?;
            let removed = shell.remove_bookmark(index).map_err(|e| e.to_string())?;
            Ok(json!({"removed": removed.id}))
        }
        "bookmark.open" => {
            let index = index_param(params)?;
            let outcome = shell.open_bookmark(index).map_err(|e| e.to_string())?;
            Ok(outcome_json(&outcome))
        }
        "bookmark.flush" => {
            shell.bookmarks_mut().flush().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Chrome ───
        "controls.toggle" => Ok(json!({"controls_visible": shell.toggle_controls()})),

        // ─── Settings ───
        "settings.get" => serde_json::to_value(settings.get_settings()).map_err(|e| e.to_string()),
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            settings.set_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            settings.reset().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
