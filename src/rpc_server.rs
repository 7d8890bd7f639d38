//! SeeSound RPC server: drives the shell core over stdin/stdout.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"navigate", "params":{"url":"example.com"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//! Events:   {"event":"scroll_finished","address":"..."}
//!
//! Logs go to stderr so stdout carries protocol lines only. The server stops
//! when stdin closes or a stdout write fails.

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};

use seesound::app::App;
use seesound::database::{Database, SqliteKvStore};
use seesound::engine::HeadlessEngine;
use seesound::platform;
use seesound::rpc_handler::write_line;
use seesound::services::settings_engine::SettingsEngine;

fn emit(line: &Value) -> std::io::Result<()> {
    write_line(&mut std::io::stdout().lock(), line)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let db_path = platform::database_path();
    let db = Database::open(&db_path)?;
    log::info!("device storage at {}", db_path.display());

    let (app, handle, mut notifications) = App::new(
        HeadlessEngine::default(),
        SettingsEngine::new(None),
        Box::new(SqliteKvStore::new(db)),
    )?;
    let control = tokio::spawn(app.run());

    let mut written = emit(&json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while written.is_ok() {
        written = tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(l)) => l,
                    Ok(None) => break,
                    Err(e) => {
                        log::error!("stdin read failed: {}", e);
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }

                match serde_json::from_str::<Value>(&line) {
                    Ok(req) => {
                        let id = req.get("id").cloned().unwrap_or(Value::Null);
                        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
                        let params = req.get("params").cloned().unwrap_or(json!({}));

                        let response = match handle.call(method, params).await {
                            Ok(val) => json!({"id": id, "result": val}),
                            Err(err) => json!({"id": id, "error": err}),
                        };
                        emit(&response)
                    }
                    Err(e) => emit(&json!({"id": null, "error": format!("parse error: {}", e)})),
                }
            }
            Some(event) = notifications.recv() => {
                match serde_json::to_value(&event) {
                    Ok(v) => emit(&v),
                    Err(e) => {
                        log::error!("cannot encode notification: {}", e);
                        Ok(())
                    }
                }
            }
        };
    }
    if let Err(e) = written {
        log::error!("stdout write failed, stopping: {}", e);
    }

    handle.shutdown().await;
    control.await?;
    Ok(())
}
