use serde::{Deserialize, Serialize};

/// Slowest commanded speed, in content units per second.
pub const MIN_SPEED: f64 = 30.0;
/// Fastest commanded speed, in content units per second.
pub const MAX_SPEED: f64 = 500.0;
/// Speed used when nothing else was configured.
pub const DEFAULT_SPEED: f64 = 50.0;
/// Floor on per-frame movement so very slow speeds still progress.
pub const MIN_STEP: f64 = 0.5;
/// Callback rate requested from the frame scheduler.
pub const NOMINAL_FRAME_RATE: u32 = 60;
/// Highest callback rate the frame scheduler is ever asked for.
pub const MAX_FRAME_RATE: u32 = 240;

/// Clamps a speed into `[MIN_SPEED, MAX_SPEED]`.
pub fn clamp_speed(speed: f64) -> f64 {
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

/// Clamps a requested frame rate into `1..=MAX_FRAME_RATE`.
pub fn clamp_frame_rate(fps: u32) -> u32 {
    fps.clamp(1, MAX_FRAME_RATE)
}

/// Driver lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScrollState {
    /// No timer, intent off.
    #[default]
    Idle,
    /// Timer active, intent on.
    Running,
    /// Intent on, timer torn down while the user drags.
    Suspended,
}

/// Identity of one scheduled repeating frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameTimer(pub u64);

/// One firing of a frame timer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    pub timer: FrameTimer,
    /// Measured callback rate; may be zero or non-finite on the first firing.
    pub frames_per_second: f64,
}

/// What a single tick did to the surface.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The tick belonged to a cancelled or foreign timer.
    Ignored,
    /// The offset moved.
    Advanced { from: f64, to: f64 },
    /// Content end reached; the driver is now idle.
    Finished,
    /// Arithmetic went non-finite; offset left untouched.
    Skipped,
}
