// SeeSound platform paths for macOS
// Config: ~/Library/Preferences/SeeSound
// Data:   ~/Library/Application Support/SeeSound

use std::env;
use std::path::PathBuf;

fn library_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp"))).join("Library")
}

pub fn get_config_dir() -> PathBuf {
    library_dir().join("Preferences").join("SeeSound")
}

pub fn get_data_dir() -> PathBuf {
    library_dir().join("Application Support").join("SeeSound")
}
