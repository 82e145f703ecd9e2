use std::error::Error;

use anubis_shell::types::errors::*;
use anubis_shell::types::surface::{SurfaceId, TabId};

// === SurfaceError Tests ===

#[test]
fn surface_error_display_variants() {
    assert_eq!(
        SurfaceError::NotFound(SurfaceId::Tab(TabId(3))).to_string(),
        "Surface not found: tab:3"
    );
    assert_eq!(
        SurfaceError::CreationFailed("no gpu".to_string()).to_string(),
        "Surface creation failed: no gpu"
    );
}

#[test]
fn surface_error_implements_error_trait() {
    let err: Box<dyn Error> = Box::new(SurfaceError::NotFound(SurfaceId::Primary));
    assert!(err.source().is_none());
}

// === HostError Tests ===

#[test]
fn host_error_display_variants() {
    assert_eq!(
        HostError::SurfaceUnavailable(SurfaceId::Tab(TabId(1))).to_string(),
        "Host surface unavailable: tab:1"
    );
    assert_eq!(
        HostError::OperationFailed("reload".to_string()).to_string(),
        "Host operation failed: reload"
    );
    assert_eq!(
        HostError::ExternalOpenFailed("https://discord.gg/x".to_string()).to_string(),
        "Failed to open external URL: https://discord.gg/x"
    );
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("denied".to_string()).to_string(),
        "Settings I/O error: denied"
    );
    assert_eq!(
        SettingsError::SerializationError("eof".to_string()).to_string(),
        "Settings serialization error: eof"
    );
    assert_eq!(
        SettingsError::InvalidValue("titleBarColor".to_string()).to_string(),
        "Invalid settings value: titleBarColor"
    );
}

// === ShortcutError / ThemeError Tests ===

#[test]
fn shortcut_error_display_variants() {
    assert_eq!(
        ShortcutError::NotFound("zoom_in".to_string()).to_string(),
        "Shortcut not found for action: zoom_in"
    );
    assert_eq!(
        ShortcutError::Conflict("Ctrl+R".to_string()).to_string(),
        "Shortcut conflict: Ctrl+R"
    );
    assert_eq!(
        ShortcutError::InvalidKeys("".to_string()).to_string(),
        "Invalid shortcut keys: "
    );
}

#[test]
fn theme_error_display() {
    assert_eq!(
        ThemeError::InvalidColor("#zzz".to_string()).to_string(),
        "Invalid color: #zzz"
    );
}

// === ControllerError Tests ===

#[test]
fn controller_error_wraps_sources() {
    let err = ControllerError::from(SurfaceError::CreationFailed(
        HostError::OperationFailed("no gpu".to_string()).to_string(),
    ));
    assert_eq!(
        err.to_string(),
        "Surface error: Surface creation failed: Host operation failed: no gpu"
    );
    assert!(err.source().is_some());

    let err = ControllerError::from(SurfaceError::NotFound(SurfaceId::Primary));
    assert_eq!(err.to_string(), "Surface error: Surface not found: primary");

    let err = ControllerError::from(SettingsError::InvalidValue("gameUrl".to_string()));
    assert_eq!(err.to_string(), "Settings error: Invalid settings value: gameUrl");
    assert!(err.source().is_some());
}

#[test]
fn controller_error_wraps_shortcut_error() {
    let err = ControllerError::from(ShortcutError::InvalidKeys("'Ctrl+'".to_string()));
    assert_eq!(err.to_string(), "Shortcut error: Invalid shortcut keys: 'Ctrl+'");
    assert!(err.source().is_some());
}

#[test]
fn controller_closed_has_no_source() {
    let err = ControllerError::Closed;
    assert_eq!(err.to_string(), "Controller is closed");
    assert!(err.source().is_none());
}

// === ChannelError Tests ===

#[test]
fn channel_error_display_variants() {
    assert_eq!(
        ChannelError::Parse("expected value".to_string()).to_string(),
        "parse error: expected value"
    );
    assert_eq!(
        ChannelError::UnknownMessage("unknown variant".to_string()).to_string(),
        "unknown message: unknown variant"
    );
}
