// SeeSound services
// Services provide supporting functionality: frame timing and settings.

pub mod frame_clock;
pub mod settings_engine;
