//! App Core for SeeSound.
//!
//! Owns the [`Shell`] on a single control task. Frame ticks, engine signals
//! and RPC calls reach it only as messages on tokio channels, so every state
//! change happens on that one task.

use serde::Serialize;
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};

use crate::database::KeyValueStore;
use crate::engine::{EngineEvent, WebEngine};
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use crate::rpc_handler::handle_method;
use crate::services::frame_clock::FrameClock;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::shell::Shell;
use crate::types::scroll::{FrameTick, TickOutcome};

/// Depth of the command queue; senders wait when it is full.
const INBOX_CAPACITY: usize = 64;

/// Messages the control task accepts.
#[derive(Debug)]
pub enum ControlMessage {
    /// A method call; the result goes back on `reply`.
    Rpc {
        method: String,
        params: Value,
        reply: oneshot::Sender<Result<Value, String>>,
    },
    /// A signal from a platform web view.
    Engine(EngineEvent),
    /// Stop the loop after flushing state.
    Shutdown,
}

/// Unsolicited events for the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    /// Auto-scroll reached the end of the page and turned itself off.
    ScrollFinished { address: String },
}

/// Cloneable sender side of the control task.
#[derive(Clone)]
pub struct AppHandle {
    tx: mpsc::Sender<ControlMessage>,
}

impl AppHandle {
    /// Calls a method on the control task and waits for the result.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, String> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(ControlMessage::Rpc {
                method: method.to_string(),
                params,
                reply,
            })
            .await
            .map_err(|_| "control loop stopped".to_string())?;
        rx.await.map_err(|_| "control loop dropped the call".to_string())?
    }

    /// Forwards an engine signal. Returns false once the loop has stopped.
    pub async fn send_event(&self, event: EngineEvent) -> bool {
        self.tx.send(ControlMessage::Engine(event)).await.is_ok()
    }

    /// Asks the loop to stop.
    pub async fn shutdown(&self) {
        let _ = self.tx.send(ControlMessage::Shutdown).await;
    }
}

/// The control task's state.
pub struct App<E: WebEngine> {
    shell: Shell<E, FrameClock>,
    settings: SettingsEngine,
    ticks: mpsc::UnboundedReceiver<FrameTick>,
    inbox: mpsc::Receiver<ControlMessage>,
    notifications: mpsc::UnboundedSender<Notification>,
}

enum Wake {
    Tick(FrameTick),
    Message(Option<ControlMessage>),
}

impl<E: WebEngine> App<E> {
    /// Builds the app around `engine` and a bookmark store.
    ///
    /// Must be called inside a tokio runtime; the frame clock spawns onto it.
    pub fn new(
        engine: E,
        mut settings: SettingsEngine,
        store: Box<dyn KeyValueStore>,
    ) -> Result<(Self, AppHandle, mpsc::UnboundedReceiver<Notification>), Box<dyn std::error::Error>> {
        let handle = Handle::try_current()?;

        let loaded = match settings.load() {
            Ok(s) => s,
            Err(e) => {
                log::warn!("settings unreadable, using defaults: {}", e);
                settings.get_settings().clone()
            }
        };

        let (tick_tx, ticks) = mpsc::unbounded_channel();
        let (tx, inbox) = mpsc::channel(INBOX_CAPACITY);
        let (notifications, notification_rx) = mpsc::unbounded_channel();

        let clock = FrameClock::new(handle, tick_tx);
        let bookmarks = BookmarkManager::new(store);
        let shell = Shell::new(engine, clock, bookmarks, &loaded)?;

        let app = Self {
            shell,
            settings,
            ticks,
            inbox,
            notifications,
        };
        Ok((app, AppHandle { tx }, notification_rx))
    }

    /// Runs until `Shutdown` or until every handle is dropped.
    ///
    /// Returns the shell so callers can inspect the final state.
    pub async fn run(mut self) -> Shell<E, FrameClock> {
        log::debug!("control loop running");
        loop {
            let wake = tokio::select! {
                Some(tick) = self.ticks.recv() => Wake::Tick(tick),
                msg = self.inbox.recv() => Wake::Message(msg),
            };

            match wake {
                Wake::Tick(tick) => self.on_tick(tick),
                Wake::Message(Some(ControlMessage::Rpc { method, params, reply })) => {
                    let result = handle_method(&mut self.shell, &mut self.settings, &method, &params);
                    if let Err(e) = &result {
                        log::debug!("{} failed: {}", method, e);
                    }
                    let _ = reply.send(result);
                }
                Wake::Message(Some(ControlMessage::Engine(event))) => {
                    self.shell.handle_engine_event(event);
                    self.shell.pump_engine_events();
                }
                Wake::Message(Some(ControlMessage::Shutdown)) | Wake::Message(None) => break,
            }
        }

        self.shell.stop_scrolling();
        if let Err(e) = self.shell.bookmarks_mut().flush() {
            log::error!("bookmarks not saved at shutdown: {}", e);
        }
        log::debug!("control loop stopped");
        self.shell
    }

    fn on_tick(&mut self, tick: FrameTick) {
        if self.shell.on_frame(tick) == TickOutcome::Finished {
            let address = self.shell.navigation().current_address().to_string();
            let _ = self.notifications.send(Notification::ScrollFinished { address });
        }
    }

    pub fn shell(&self) -> &Shell<E, FrameClock> {
        &self.shell
    }
}
