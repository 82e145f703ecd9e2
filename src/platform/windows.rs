// Windows locations.
// Config:  %APPDATA%/AnubisShell
// Session: %LOCALAPPDATA%/AnubisShell/Session

use std::env;
use std::path::PathBuf;

/// `%APPDATA%/AnubisShell`
pub fn get_config_dir() -> PathBuf {
    let appdata = env::var("APPDATA")
        .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("AnubisShell")
}

/// `%LOCALAPPDATA%/AnubisShell/Session`. WebView2 profiles are machine-local.
pub fn get_session_data_dir() -> PathBuf {
    let local_appdata = env::var("LOCALAPPDATA")
        .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Local"));
    PathBuf::from(local_appdata)
        .join("AnubisShell")
        .join("Session")
}
