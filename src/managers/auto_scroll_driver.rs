//! Auto-scroll driver for SeeSound.
//!
//! Advances a content surface's vertical offset once per display frame at a
//! commanded speed. Manual dragging suspends the timer; releasing resumes at
//! the last commanded speed. Reaching the end of the content turns the
//! session off.
//!
//! The driver owns at most one frame timer. Every start cancels the previous
//! timer first, and ticks carrying any other timer id are ignored, so a tick
//! already queued when `stop` runs has no effect.

use crate::engine::ContentSurface;
use crate::services::frame_clock::FrameScheduler;
use crate::types::errors::ScrollError;
use crate::types::scroll::{
    clamp_frame_rate, clamp_speed, FrameTick, FrameTimer, ScrollState, TickOutcome, DEFAULT_SPEED,
    MIN_STEP, NOMINAL_FRAME_RATE,
};

/// Frame-driven scroll session for one content surface.
pub struct AutoScrollDriver<S: FrameScheduler> {
    scheduler: S,
    preferred_fps: u32,
    state: ScrollState,
    intent: bool,
    commanded_speed: f64,
    last_commanded_speed: f64,
    timer: Option<FrameTimer>,
}

impl<S: FrameScheduler> AutoScrollDriver<S> {
    pub fn new(scheduler: S) -> Self {
        Self::with_frame_rate(scheduler, NOMINAL_FRAME_RATE)
    }

    /// Creates a driver that asks the scheduler for `preferred_fps` callbacks per second.
    /// The rate is clamped into `1..=MAX_FRAME_RATE`.
    pub fn with_frame_rate(scheduler: S, preferred_fps: u32) -> Self {
        Self {
            scheduler,
            preferred_fps: clamp_frame_rate(preferred_fps),
            state: ScrollState::Idle,
            intent: false,
            commanded_speed: DEFAULT_SPEED,
            last_commanded_speed: DEFAULT_SPEED,
            timer: None,
        }
    }

    /// Starts scrolling at `speed` content units per second.
    ///
    /// Returns false, changing nothing, when `speed` is not a positive number.
    pub fn start(&mut self, speed: f64) -> bool {
        if !speed.is_finite() || speed <= 0.0 {
            log::debug!("auto-scroll start ignored for speed {}", speed);
            return false;
        }
        let speed = clamp_speed(speed);
        self.commanded_speed = speed;
        self.last_commanded_speed = speed;
        self.intent = true;
        self.arm();
        log::debug!("auto-scroll started at {} units/s", speed);
        true
    }

    /// Changes the speed without restarting the timer.
    ///
    /// While suspended the new speed is remembered and used on resume.
    pub fn update_speed(&mut self, speed: f64) -> bool {
        if !speed.is_finite() || speed <= 0.0 {
            return false;
        }
        let speed = clamp_speed(speed);
        self.last_commanded_speed = speed;
        if self.state == ScrollState::Running {
            self.commanded_speed = speed;
        }
        true
    }

    /// Turns auto-scroll off. Safe to call in any state.
    pub fn stop(&mut self) {
        let was = self.state;
        self.disarm();
        self.intent = false;
        self.state = ScrollState::Idle;
        if was != ScrollState::Idle {
            log::debug!("auto-scroll stopped (was {:?})", was);
        }
    }

    /// Tears the session down because the surface now shows another page.
    pub fn surface_replaced(&mut self) {
        if self.state != ScrollState::Idle {
            log::debug!("auto-scroll session ended by page replacement");
        }
        self.stop();
    }

    /// Manual drag takes precedence: suspend the timer, keep the intent.
    pub fn drag_started(&mut self) {
        if self.state == ScrollState::Running {
            self.disarm();
            self.state = ScrollState::Suspended;
            log::debug!("auto-scroll suspended for manual drag");
        }
    }

    /// Resumes at the last commanded speed if auto-scroll is still wanted.
    ///
    /// Returns true when a timer was (re)started.
    pub fn drag_ended(&mut self) -> bool {
        if !self.intent || self.state == ScrollState::Running {
            return false;
        }
        self.commanded_speed = self.last_commanded_speed;
        self.arm();
        log::debug!("auto-scroll resumed at {} units/s", self.commanded_speed);
        true
    }

    /// Advances `surface` by one frame.
    pub fn tick(&mut self, tick: FrameTick, surface: &mut dyn ContentSurface) -> TickOutcome {
        if self.timer != Some(tick.timer) {
            return TickOutcome::Ignored;
        }

        let rate = if tick.frames_per_second.is_finite() && tick.frames_per_second > 0.0 {
            tick.frames_per_second
        } else {
            f64::from(self.preferred_fps)
        };
        let delta = (self.commanded_speed / rate).max(MIN_STEP);
        let offset = surface.vertical_offset();
        let max = surface.max_scroll_offset();

        if offset >= max {
            self.stop();
            log::debug!("auto-scroll reached content end at offset {}", offset);
            return TickOutcome::Finished;
        }

        // f64::min drops a NaN operand, so check before clamping.
        let next = offset + delta;
        if !next.is_finite() || !max.is_finite() {
            let err = ScrollError::NonFiniteOffset { offset, delta, max };
            log::debug!("skipping frame: {}", err);
            return TickOutcome::Skipped;
        }

        let candidate = next.min(max);
        surface.set_vertical_offset(candidate);
        TickOutcome::Advanced {
            from: offset,
            to: candidate,
        }
    }

    /// Schedules a fresh timer, cancelling any previous one first.
    fn arm(&mut self) {
        self.disarm();
        self.timer = Some(self.scheduler.schedule(self.preferred_fps));
        self.state = ScrollState::Running;
    }

    fn disarm(&mut self) {
        if let Some(timer) = self.timer.take() {
            self.scheduler.cancel(timer);
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// The user's on/off wish, true while running or suspended.
    pub fn is_active(&self) -> bool {
        self.intent
    }

    pub fn commanded_speed(&self) -> f64 {
        self.commanded_speed
    }

    pub fn last_commanded_speed(&self) -> f64 {
        self.last_commanded_speed
    }

    pub fn active_timer(&self) -> Option<FrameTimer> {
        self.timer
    }

    pub fn preferred_fps(&self) -> u32 {
        self.preferred_fps
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}
