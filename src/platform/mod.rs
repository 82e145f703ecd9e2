// Per-OS locations for the shell's configuration and webview profile data,
// and the system-browser handoff.
// `cfg(target_os)` picks the implementation at compile time.

use std::io;
use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the directory holding `settings.json`.
///
/// - **Linux**: `$XDG_CONFIG_HOME/anubis-shell` or `~/.config/anubis-shell`
/// - **macOS**: `~/Library/Application Support/AnubisShell`
/// - **Windows**: `%APPDATA%/AnubisShell`
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
}

/// Returns the directory backing the primary surface's persistent session
/// (cookies, local storage, HTTP cache).
///
/// - **Linux**: `$XDG_DATA_HOME/anubis-shell/session` or `~/.local/share/anubis-shell/session`
/// - **macOS**: `~/Library/Application Support/AnubisShell/Session`
/// - **Windows**: `%LOCALAPPDATA%/AnubisShell/Session`
pub fn get_session_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_session_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_session_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_session_data_dir()
    }
}

/// Opens `url` in the system default browser without waiting for it.
/// The URL reaches the launcher as a single argument, query string included.
pub fn open_in_browser(url: &str) -> io::Result<()> {
    open::that_detached(url)
}
