// macOS locations.
// Config:  ~/Library/Application Support/AnubisShell
// Session: ~/Library/Application Support/AnubisShell/Session

use std::env;
use std::path::PathBuf;

fn app_support_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
        .join("Library")
        .join("Application Support")
        .join("AnubisShell")
}

pub fn get_config_dir() -> PathBuf {
    app_support_dir()
}

pub fn get_session_data_dir() -> PathBuf {
    app_support_dir().join("Session")
}
