// Linux locations, following the XDG base directory layout.
// Config:  ~/.config/anubis-shell
// Session: ~/.local/share/anubis-shell/session

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "anubis-shell";

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// `$XDG_CONFIG_HOME/anubis-shell` if set, otherwise `~/.config/anubis-shell`.
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_DIR),
        _ => home_dir().join(".config").join(APP_DIR),
    }
}

/// `$XDG_DATA_HOME/anubis-shell/session` if set, otherwise under `~/.local/share`.
pub fn get_session_data_dir() -> PathBuf {
    let base = match env::var("XDG_DATA_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => home_dir().join(".local").join("share"),
    };
    base.join(APP_DIR).join("session")
}
