//! Frame Clock for SeeSound.
//!
//! Repeating per-display-frame callbacks with cancel. [`FrameClock`] runs one
//! tokio interval task per timer and posts [`FrameTick`]s into the control
//! loop's channel; [`ManualFrameScheduler`] only records what was asked of it
//! so a caller can fire ticks by hand.

use std::collections::HashMap;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::types::scroll::{clamp_frame_rate, FrameTick, FrameTimer};

/// Trait defining the repeating-tick scheduling primitive.
pub trait FrameScheduler: Send {
    /// Starts a repeating callback at roughly `preferred_fps` per second.
    fn schedule(&mut self, preferred_fps: u32) -> FrameTimer;
    /// Stops a callback. Unknown or already-cancelled timers are ignored.
    fn cancel(&mut self, timer: FrameTimer);
}

/// Tokio-backed frame clock.
pub struct FrameClock {
    handle: Handle,
    ticks: UnboundedSender<FrameTick>,
    next_id: u64,
    tasks: HashMap<FrameTimer, JoinHandle<()>>,
}

impl FrameClock {
    /// Creates a clock that spawns timer tasks on `handle` and delivers ticks to `ticks`.
    pub fn new(handle: Handle, ticks: UnboundedSender<FrameTick>) -> Self {
        Self {
            handle,
            ticks,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    /// Number of timer tasks currently alive.
    pub fn active_timers(&self) -> usize {
        self.tasks.len()
    }
}

impl FrameScheduler for FrameClock {
    fn schedule(&mut self, preferred_fps: u32) -> FrameTimer {
        self.next_id += 1;
        let timer = FrameTimer(self.next_id);
        let preferred_fps = clamp_frame_rate(preferred_fps);
        let period = Duration::from_secs_f64(1.0 / f64::from(preferred_fps));
        let tx = self.ticks.clone();

        let task = self.handle.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of a tokio interval completes immediately.
            interval.tick().await;
            let mut last = Instant::now();
            loop {
                interval.tick().await;
                let now = Instant::now();
                let elapsed = now.duration_since(last).as_secs_f64();
                last = now;
                let frames_per_second = if elapsed > 0.0 { 1.0 / elapsed } else { 0.0 };
                if tx.send(FrameTick { timer, frames_per_second }).is_err() {
                    break;
                }
            }
        });

        log::trace!("frame timer {:?} scheduled at {} fps", timer, preferred_fps);
        self.tasks.insert(timer, task);
        timer
    }

    fn cancel(&mut self, timer: FrameTimer) {
        if let Some(task) = self.tasks.remove(&timer) {
            task.abort();
            log::trace!("frame timer {:?} cancelled", timer);
        }
    }
}

impl Drop for FrameClock {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

/// Scheduler that never fires on its own.
#[derive(Debug, Default)]
pub struct ManualFrameScheduler {
    next_id: u64,
    active: Vec<FrameTimer>,
    scheduled: usize,
    cancelled: usize,
    last_preferred_fps: Option<u32>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timers scheduled and not yet cancelled.
    pub fn active_timers(&self) -> &[FrameTimer] {
        &self.active
    }

    /// Total `schedule` calls.
    pub fn scheduled_count(&self) -> usize {
        self.scheduled
    }

    /// Total `cancel` calls that hit a live timer.
    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }

    pub fn last_preferred_fps(&self) -> Option<u32> {
        self.last_preferred_fps
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn schedule(&mut self, preferred_fps: u32) -> FrameTimer {
        self.next_id += 1;
        let timer = FrameTimer(self.next_id);
        self.active.push(timer);
        self.scheduled += 1;
        self.last_preferred_fps = Some(preferred_fps);
        timer
    }

    fn cancel(&mut self, timer: FrameTimer) {
        let before = self.active.len();
        self.active.retain(|t| *t != timer);
        if self.active.len() != before {
            self.cancelled += 1;
        }
    }
}
