use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::settings::{ConfigOverrides, SessionConfig};
use super::surface::{SurfaceId, TabId};
use crate::managers::shortcut_manager::ShortcutAction;

/// Commands sent by the title bar and satellite UIs to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "kebab-case")]
pub enum WindowCommand {
    Minimize,
    /// Toggles between maximized and restored.
    Maximize,
    Close,
    Reload,
    ClearCache,
    ClearCookies,
    OpenSettings,
    CloseSettings,
    /// Closes every satellite window.
    DismissSatellites,
    ToggleFullscreen { fullscreen: bool },
    ZoomIn,
    ZoomOut,
    ZoomReset,
    OpenDevTools,
    OpenExternalLink { url: String },
    CloseTab { id: TabId },
    SwitchTab { id: SurfaceId },
    PreviewSettings { settings: ConfigOverrides },
    UpdateSettings { settings: ConfigOverrides },
    Shortcut { keys: String },
    /// Binds `keys` to `action`, replacing its previous binding.
    RebindShortcut { action: ShortcutAction, keys: String },
    UnbindShortcut { action: ShortcutAction },
    ResetShortcuts,
}

/// Notifications sent from the controller to the title bar UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Notification {
    LoadingProgress { progress: f64 },
    UpdateColors { color: String },
    FullscreenChanged { fullscreen: bool },
    ZoomChanged { factor: f64 },
    TabCreated { id: TabId, title: String },
    TabUpdated { id: TabId, title: String },
    TabClosed { id: TabId },
    RecoveryExhausted { surface: SurfaceId },
}

/// Geometry and mode events raised by the root window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum WindowEvent {
    Resized { bounds: Rect },
    Moved { bounds: Rect },
    Maximized,
    Unmaximized,
    EnteredFullscreen,
    LeftFullscreen,
    Minimized,
    Focused,
    ThemeUpdated,
    ReadyToShow,
    CloseRequested,
    SatelliteClosed { kind: SatelliteKind },
}

/// Process-level events that are not tied to a single surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ProcessEvent {
    GpuProcessGone,
}

/// Secondary windows parented to the root window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SatelliteKind {
    Settings,
    ExternalLinkPrompt,
}

impl SatelliteKind {
    /// Default size of the satellite window.
    pub fn size(&self) -> (u32, u32) {
        match self {
            SatelliteKind::Settings => (360, 500),
            SatelliteKind::ExternalLinkPrompt => (360, 200),
        }
    }
}

/// A satellite window request, carrying the data its page is loaded with.
#[derive(Debug, Clone, PartialEq)]
pub enum Satellite {
    Settings { config: SessionConfig, bounds: Rect },
    ExternalLinkPrompt { url: String, bounds: Rect },
}

impl Satellite {
    pub fn kind(&self) -> SatelliteKind {
        match self {
            Satellite::Settings { .. } => SatelliteKind::Settings,
            Satellite::ExternalLinkPrompt { .. } => SatelliteKind::ExternalLinkPrompt,
        }
    }
}

/// Whether a pending navigation may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationDecision {
    Allow,
    Cancel,
}
