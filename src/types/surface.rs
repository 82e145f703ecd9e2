use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of an external tab surface. Allocated monotonically per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab:{}", self.0)
    }
}

/// Identity of any surface owned by the window.
///
/// On the wire the primary surface is the string `"primary"` (`"main"` is
/// accepted too) and a tab is its bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SurfaceIdRepr", into = "SurfaceIdRepr")]
pub enum SurfaceId {
    Primary,
    Tab(TabId),
}

impl SurfaceId {
    pub fn is_primary(&self) -> bool {
        matches!(self, SurfaceId::Primary)
    }

    pub fn tab(&self) -> Option<TabId> {
        match self {
            SurfaceId::Primary => None,
            SurfaceId::Tab(id) => Some(*id),
        }
    }
}

impl From<TabId> for SurfaceId {
    fn from(id: TabId) -> Self {
        SurfaceId::Tab(id)
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceId::Primary => write!(f, "primary"),
            SurfaceId::Tab(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SurfaceIdRepr {
    Tab(u64),
    Named(String),
}

impl TryFrom<SurfaceIdRepr> for SurfaceId {
    type Error = String;

    fn try_from(repr: SurfaceIdRepr) -> Result<Self, Self::Error> {
        match repr {
            SurfaceIdRepr::Tab(n) => Ok(SurfaceId::Tab(TabId(n))),
            SurfaceIdRepr::Named(name) => match name.as_str() {
                "primary" | "main" => Ok(SurfaceId::Primary),
                other => other
                    .parse::<u64>()
                    .map(|n| SurfaceId::Tab(TabId(n)))
                    .map_err(|_| format!("unknown surface id: {}", other)),
            },
        }
    }
}

impl From<SurfaceId> for SurfaceIdRepr {
    fn from(id: SurfaceId) -> Self {
        match id {
            SurfaceId::Primary => SurfaceIdRepr::Named("primary".to_string()),
            SurfaceId::Tab(TabId(n)) => SurfaceIdRepr::Tab(n),
        }
    }
}

/// Lifecycle state of a surface.
///
/// `created -> loading -> ready <-> loading`, any live state may fall into
/// `crashed` or `failed`, those go through `recovering` back to `loading` or
/// end in `terminal`. `destroyed` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceState {
    Created,
    Loading,
    Ready,
    Crashed,
    Failed,
    Recovering,
    Terminal,
    Destroyed,
}

impl SurfaceState {
    /// Whether the lifecycle allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: SurfaceState) -> bool {
        use SurfaceState::*;
        match (self, next) {
            (Destroyed, _) => false,
            (_, Destroyed) => true,
            (Created | Ready | Loading | Crashed | Failed | Recovering | Terminal, Loading) => true,
            (Loading, Ready) => true,
            (Created | Loading | Ready | Recovering, Crashed | Failed) => true,
            (Crashed | Failed, Recovering | Terminal) => true,
            _ => false,
        }
    }

    pub fn is_loading(self) -> bool {
        self == SurfaceState::Loading
    }

    pub fn is_destroyed(self) -> bool {
        self == SurfaceState::Destroyed
    }
}

/// Why a renderer process went away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderExitReason {
    CleanExit,
    AbnormalExit,
    Killed,
    Crashed,
    Oom,
    LaunchFailed,
    IntegrityFailure,
}

impl RenderExitReason {
    /// Exits that warrant automatic recovery.
    pub fn is_abnormal(self) -> bool {
        matches!(self, RenderExitReason::Crashed | RenderExitReason::Oom)
    }
}

/// A failed load as reported by the rendering runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadFailure {
    /// Network error code; negative, more negative is more severe.
    pub code: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    pub main_frame: bool,
}

/// What to wipe from a surface's browsing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClearScope {
    /// HTTP cache, service workers, cache storage and shader cache.
    Cache,
    /// Service workers only; the lightweight pressure mitigation.
    ServiceWorkers,
    Cookies,
}

/// Lifecycle and telemetry signals emitted by a surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "kebab-case")]
pub enum SurfaceSignal {
    LoadStarted,
    LoadFinished,
    LoadFailed(LoadFailure),
    RenderProcessGone { reason: RenderExitReason },
    TitleUpdated { title: String },
    HeapReport { used_bytes: u64 },
    DataCleared { scope: ClearScope, ok: bool },
}

/// Per-surface presentation attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceOptions {
    pub url: String,
    pub frame_rate: u32,
    pub audio_muted: bool,
    pub zoom: f64,
    /// Primary surfaces keep a persistent session partition; tabs do not.
    pub persistent_session: bool,
    pub background_throttling: bool,
}

impl SurfaceOptions {
    pub fn primary(url: &str) -> Self {
        Self {
            url: url.to_string(),
            frame_rate: 60,
            audio_muted: false,
            zoom: 1.0,
            persistent_session: true,
            background_throttling: false,
        }
    }

    pub fn tab(url: &str) -> Self {
        Self {
            url: url.to_string(),
            frame_rate: 60,
            audio_muted: false,
            zoom: 1.0,
            persistent_session: false,
            background_throttling: false,
        }
    }
}
