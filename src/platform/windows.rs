// SeeSound platform paths for Windows
// Config: %APPDATA%/SeeSound/config
// Data:   %APPDATA%/SeeSound/data

use std::env;
use std::path::PathBuf;

fn app_root() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("SeeSound")
}

pub fn get_config_dir() -> PathBuf {
    app_root().join("config")
}

pub fn get_data_dir() -> PathBuf {
    app_root().join("data")
}
