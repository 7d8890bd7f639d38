use serde::{Deserialize, Serialize};

use super::scroll::{DEFAULT_SPEED, MAX_FRAME_RATE, MAX_SPEED, NOMINAL_FRAME_RATE};

/// Top-level shell settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ShellSettings {
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub scroll: ScrollSettings,
}

/// Address and panel settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    /// Address loaded on startup.
    pub home_url: String,
    /// Whether the address/speed panel starts expanded.
    #[serde(default = "default_true")]
    pub controls_visible: bool,
}

fn default_true() -> bool {
    true
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            home_url: "https://www.google.com".to_string(),
            controls_visible: true,
        }
    }
}

/// Auto-scroll tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrollSettings {
    /// Speed the slider starts at, content units per second.
    pub default_speed: f64,
    /// Amount the faster/slower buttons change the speed by.
    pub speed_step: f64,
    /// Granularity of the speed slider.
    pub slider_step: f64,
    /// Callback rate requested from the frame clock.
    pub preferred_frame_rate: u32,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            default_speed: DEFAULT_SPEED,
            speed_step: 50.0,
            slider_step: 10.0,
            preferred_frame_rate: NOMINAL_FRAME_RATE,
        }
    }
}

impl ScrollSettings {
    /// Checks value ranges that serde alone cannot express.
    ///
    /// Returns the name of the first offending field with a reason.
    pub fn validate(&self) -> Result<(), String> {
        if !self.default_speed.is_finite() {
            return Err("default_speed must be a finite number".to_string());
        }
        if !valid_step(self.speed_step) {
            return Err(format!("speed_step must be above 0 and at most {}", MAX_SPEED));
        }
        if !valid_step(self.slider_step) {
            return Err(format!("slider_step must be above 0 and at most {}", MAX_SPEED));
        }
        if !(1..=MAX_FRAME_RATE).contains(&self.preferred_frame_rate) {
            return Err(format!(
                "preferred_frame_rate must be between 1 and {}",
                MAX_FRAME_RATE
            ));
        }
        Ok(())
    }

    /// Copy with every out-of-range value replaced by its default or clamped.
    ///
    /// Used for values read straight from a hand-edited file.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let step = |v: f64, fallback: f64| if valid_step(v) { v } else { fallback };
        Self {
            default_speed: if self.default_speed.is_finite() {
                self.default_speed
            } else {
                defaults.default_speed
            },
            speed_step: step(self.speed_step, defaults.speed_step),
            slider_step: step(self.slider_step, defaults.slider_step),
            preferred_frame_rate: self.preferred_frame_rate.clamp(1, MAX_FRAME_RATE),
        }
    }
}

fn valid_step(step: f64) -> bool {
    step > 0.0 && step <= MAX_SPEED
}
