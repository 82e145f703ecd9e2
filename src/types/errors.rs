use std::fmt;

use super::surface::SurfaceId;

// === SurfaceError ===

/// Errors related to surface registry operations.
#[derive(Debug)]
pub enum SurfaceError {
    /// No live surface with the given identity is registered.
    NotFound(SurfaceId),
    /// The surface could not be created by the host.
    CreationFailed(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::NotFound(id) => write!(f, "Surface not found: {}", id),
            SurfaceError::CreationFailed(msg) => write!(f, "Surface creation failed: {}", msg),
        }
    }
}

impl std::error::Error for SurfaceError {}

// === HostError ===

/// Errors reported by the windowing/rendering host.
#[derive(Debug)]
pub enum HostError {
    /// The host has no handle for the requested surface (already closed, never created).
    SurfaceUnavailable(SurfaceId),
    /// A host primitive failed.
    OperationFailed(String),
    /// Handing a URL to the system browser failed.
    ExternalOpenFailed(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::SurfaceUnavailable(id) => write!(f, "Host surface unavailable: {}", id),
            HostError::OperationFailed(msg) => write!(f, "Host operation failed: {}", msg),
            HostError::ExternalOpenFailed(msg) => {
                write!(f, "Failed to open external URL: {}", msg)
            }
        }
    }
}

impl std::error::Error for HostError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === ShortcutError ===

/// Errors related to keyboard shortcut management.
#[derive(Debug)]
pub enum ShortcutError {
    /// Shortcut for the given action was not found.
    NotFound(String),
    /// The shortcut keys conflict with an existing binding.
    Conflict(String),
    /// The provided key combination is invalid.
    InvalidKeys(String),
}

impl fmt::Display for ShortcutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortcutError::NotFound(action) => {
                write!(f, "Shortcut not found for action: {}", action)
            }
            ShortcutError::Conflict(msg) => write!(f, "Shortcut conflict: {}", msg),
            ShortcutError::InvalidKeys(keys) => write!(f, "Invalid shortcut keys: {}", keys),
        }
    }
}

impl std::error::Error for ShortcutError {}

// === ThemeError ===

/// Errors related to theme resolution.
#[derive(Debug)]
pub enum ThemeError {
    /// The provided color value is invalid.
    InvalidColor(String),
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeError::InvalidColor(color) => write!(f, "Invalid color: {}", color),
        }
    }
}

impl std::error::Error for ThemeError {}

// === ControllerError ===

/// Errors surfaced by the view and session controller.
#[derive(Debug)]
pub enum ControllerError {
    /// The controller has shut down; the window and its surfaces are gone.
    Closed,
    /// A surface operation failed.
    Surface(SurfaceError),
    /// A configuration update was rejected.
    Settings(SettingsError),
    /// A shortcut binding was rejected.
    Shortcut(ShortcutError),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::Closed => write!(f, "Controller is closed"),
            ControllerError::Surface(e) => write!(f, "Surface error: {}", e),
            ControllerError::Settings(e) => write!(f, "Settings error: {}", e),
            ControllerError::Shortcut(e) => write!(f, "Shortcut error: {}", e),
        }
    }
}

impl std::error::Error for ControllerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ControllerError::Closed => None,
            ControllerError::Surface(e) => Some(e),
            ControllerError::Settings(e) => Some(e),
            ControllerError::Shortcut(e) => Some(e),
        }
    }
}

impl From<SurfaceError> for ControllerError {
    fn from(e: SurfaceError) -> Self {
        ControllerError::Surface(e)
    }
}

impl From<SettingsError> for ControllerError {
    fn from(e: SettingsError) -> Self {
        ControllerError::Settings(e)
    }
}

impl From<ShortcutError> for ControllerError {
    fn from(e: ShortcutError) -> Self {
        ControllerError::Shortcut(e)
    }
}

// === ChannelError ===

/// Errors related to the newline-delimited JSON command channel.
#[derive(Debug)]
pub enum ChannelError {
    /// The line is not valid JSON.
    Parse(String),
    /// The JSON does not describe a known message.
    UnknownMessage(String),
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelError::Parse(msg) => write!(f, "parse error: {}", msg),
            ChannelError::UnknownMessage(msg) => write!(f, "unknown message: {}", msg),
        }
    }
}

impl std::error::Error for ChannelError {}
