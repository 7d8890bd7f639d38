// SeeSound platform abstraction
// Resolves where settings and device storage live on each OS.
//
// Desktop targets get their conventional per-user directories; any other
// target (mobile builds embed the core in an app sandbox) uses paths relative
// to the working directory, which the host app sets to its container.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "SEESOUND_DATA_DIR";

/// File name of the SQLite database inside the data directory.
pub const DATABASE_FILE: &str = "seesound.db";

/// Returns the configuration directory for SeeSound.
///
/// - **Linux**: `$XDG_CONFIG_HOME/seesound` or `~/.config/seesound`
/// - **macOS**: `~/Library/Preferences/SeeSound`
/// - **Windows**: `%APPDATA%/SeeSound/config`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        PathBuf::from("seesound").join("config")
    }
}

/// Returns the data directory for SeeSound.
///
/// - **Linux**: `$XDG_DATA_HOME/seesound` or `~/.local/share/seesound`
/// - **macOS**: `~/Library/Application Support/SeeSound`
/// - **Windows**: `%APPDATA%/SeeSound/data`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        PathBuf::from("seesound").join("data")
    }
}

/// Path of the device storage database, honouring [`DATA_DIR_ENV`].
pub fn database_path() -> PathBuf {
    match std::env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir).join(DATABASE_FILE),
        _ => get_data_dir().join(DATABASE_FILE),
    }
}
