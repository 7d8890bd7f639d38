// SeeSound shared type definitions
// Each submodule defines types used across the shell core.

pub mod bookmark;
pub mod errors;
pub mod navigation;
pub mod scroll;
pub mod settings;
