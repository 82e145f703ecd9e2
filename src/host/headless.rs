//! In-memory host with no windowing system.
//!
//! Records every primitive the controller invokes, keeps a manual or system
//! clock and a settable memory reading. Used by the command-channel binary
//! and by tests.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use crate::host::Host;
use crate::services::pressure_monitor::sample_system_memory;
use crate::types::errors::HostError;
use crate::types::geometry::Rect;
use crate::types::memory::MemoryInfo;
use crate::types::settings::ThemeMode;
use crate::types::surface::{ClearScope, SurfaceId, SurfaceOptions};
use crate::types::window::{Notification, Satellite, SatelliteKind};

/// One recorded host primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "kebab-case")]
pub enum HostCall {
    SetWindowBounds { bounds: Rect },
    SetWindowBackground { color: String },
    SetThemeSource { theme: ThemeMode },
    Minimize,
    Maximize,
    Unmaximize,
    SetFullscreen { fullscreen: bool },
    Show,
    FocusWindow,
    CloseWindow,
    OpenDevtools,
    CreateSurface { id: SurfaceId, options: SurfaceOptions },
    AttachSurface { id: SurfaceId },
    DetachSurface { id: SurfaceId },
    SetSurfaceBounds { id: SurfaceId, bounds: Rect },
    DetachObservers { id: SurfaceId },
    DestroySurface { id: SurfaceId },
    LoadUrl { id: SurfaceId, url: String },
    Reload { id: SurfaceId },
    SetZoom { id: SurfaceId, factor: f64 },
    SetFrameRate { id: SurfaceId, fps: u32 },
    SetAudioMuted { id: SurfaceId, muted: bool },
    FocusSurface { id: SurfaceId },
    ClearData { id: SurfaceId, scope: ClearScope },
    RequestHeapReport { id: SurfaceId },
    ReclaimMemory { id: SurfaceId },
    CollectGarbage,
    OpenSatellite { kind: SatelliteKind, bounds: Rect },
    FocusSatellite { kind: SatelliteKind },
    CloseSatellite { kind: SatelliteKind },
    SetSatelliteBackground { kind: SatelliteKind, color: String },
    OpenExternal { url: String },
    Relaunch,
}

enum Clock {
    System,
    Manual(Instant),
}

pub struct HeadlessHost {
    clock: Clock,
    memory: Option<MemoryInfo>,
    dark: bool,
    work_area: Rect,
    calls: Vec<HostCall>,
    notifications: Vec<Notification>,
    live: HashSet<SurfaceId>,
    observed: HashSet<SurfaceId>,
    attached: Option<SurfaceId>,
    satellites: HashSet<SatelliteKind>,
    fail_destroy: HashSet<SurfaceId>,
    fail_create: bool,
    fail_external: bool,
    relaunches: usize,
    violations: Vec<String>,
}

impl HeadlessHost {
    /// A host with a manual clock, for deterministic tests.
    pub fn new() -> Self {
        Self {
            clock: Clock::Manual(Instant::now()),
            memory: None,
            dark: true,
            work_area: Rect::new(0, 0, 1920, 1040),
            calls: Vec::new(),
            notifications: Vec::new(),
            live: HashSet::new(),
            observed: HashSet::new(),
            attached: None,
            satellites: HashSet::new(),
            fail_destroy: HashSet::new(),
            fail_create: false,
            fail_external: false,
            relaunches: 0,
            violations: Vec::new(),
        }
    }

    /// A host that follows wall-clock time and real system memory.
    pub fn with_system_clock() -> Self {
        Self {
            clock: Clock::System,
            ..Self::new()
        }
    }

    /// Moves the manual clock forward. No-op on the system clock.
    pub fn advance(&mut self, by: Duration) {
        if let Clock::Manual(now) = &mut self.clock {
            *now += by;
        }
    }

    pub fn set_memory(&mut self, info: MemoryInfo) {
        self.memory = Some(info);
    }

    pub fn set_prefers_dark(&mut self, dark: bool) {
        self.dark = dark;
    }

    pub fn set_work_area(&mut self, area: Rect) {
        self.work_area = area;
    }

    /// Makes the next `destroy_surface(id)` fail, as a race with an
    /// already-gone renderer would.
    pub fn fail_destroy_of(&mut self, id: SurfaceId) {
        self.fail_destroy.insert(id);
    }

    /// Makes every `create_surface` fail, as a webview that cannot start would.
    pub fn fail_surface_creation(&mut self, fail: bool) {
        self.fail_create = fail;
    }

    pub fn fail_external_open(&mut self, fail: bool) {
        self.fail_external = fail;
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn count_calls(&self, predicate: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|c| predicate(c)).count()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn is_live(&self, id: SurfaceId) -> bool {
        self.live.contains(&id)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn attached(&self) -> Option<SurfaceId> {
        self.attached
    }

    pub fn is_satellite_open(&self, kind: SatelliteKind) -> bool {
        self.satellites.contains(&kind)
    }

    pub fn relaunch_count(&self) -> usize {
        self.relaunches
    }

    /// Primitives that targeted a surface that was not alive, or a destroy
    /// that was not preceded by an observer detach.
    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    fn record(&mut self, call: HostCall) {
        debug!(?call, "host call");
        self.calls.push(call);
    }

    fn touch(&mut self, id: SurfaceId, call: HostCall) {
        if !self.live.contains(&id) {
            self.violations.push(format!("{:?} on dead surface {}", call, id));
        }
        self.record(call);
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for HeadlessHost {
    fn now(&self) -> Instant {
        match self.clock {
            Clock::System => Instant::now(),
            Clock::Manual(now) => now,
        }
    }

    fn memory_info(&self) -> MemoryInfo {
        self.memory.unwrap_or_else(sample_system_memory)
    }

    fn prefers_dark(&self) -> bool {
        self.dark
    }

    fn work_area(&self, _window: Rect) -> Rect {
        self.work_area
    }

    fn set_window_bounds(&mut self, bounds: Rect) {
        self.record(HostCall::SetWindowBounds { bounds });
    }

    fn set_window_background(&mut self, color: &str) {
        self.record(HostCall::SetWindowBackground {
            color: color.to_string(),
        });
    }

    fn set_theme_source(&mut self, theme: ThemeMode) {
        self.record(HostCall::SetThemeSource { theme });
    }

    fn minimize(&mut self) {
        self.record(HostCall::Minimize);
    }

    fn maximize(&mut self) {
        self.record(HostCall::Maximize);
    }

    fn unmaximize(&mut self) {
        self.record(HostCall::Unmaximize);
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.record(HostCall::SetFullscreen { fullscreen });
    }

    fn show(&mut self) {
        self.record(HostCall::Show);
    }

    fn focus_window(&mut self) {
        self.record(HostCall::FocusWindow);
    }

    fn close_window(&mut self) {
        self.record(HostCall::CloseWindow);
    }

    fn open_devtools(&mut self) {
        self.record(HostCall::OpenDevtools);
    }

    fn create_surface(&mut self, id: SurfaceId, options: &SurfaceOptions) -> Result<(), HostError> {
        if self.fail_create {
            return Err(HostError::OperationFailed(format!("cannot create {}", id)));
        }
        if !self.live.insert(id) {
            return Err(HostError::OperationFailed(format!("{} already exists", id)));
        }
        self.observed.insert(id);
        self.record(HostCall::CreateSurface {
            id,
            options: options.clone(),
        });
        Ok(())
    }

    fn attach_surface(&mut self, id: SurfaceId) {
        self.attached = Some(id);
        self.touch(id, HostCall::AttachSurface { id });
    }

    fn detach_surface(&mut self, id: SurfaceId) {
        if self.attached == Some(id) {
            self.attached = None;
        }
        self.touch(id, HostCall::DetachSurface { id });
    }

    fn set_surface_bounds(&mut self, id: SurfaceId, bounds: Rect) {
        self.touch(id, HostCall::SetSurfaceBounds { id, bounds });
    }

    fn detach_observers(&mut self, id: SurfaceId) {
        self.observed.remove(&id);
        self.touch(id, HostCall::DetachObservers { id });
    }

    fn destroy_surface(&mut self, id: SurfaceId) -> Result<(), HostError> {
        if self.observed.contains(&id) {
            self.violations
                .push(format!("{} destroyed with observers attached", id));
        }
        self.record(HostCall::DestroySurface { id });
        let was_live = self.live.remove(&id);
        if self.attached == Some(id) {
            self.attached = None;
        }
        if self.fail_destroy.remove(&id) || !was_live {
            return Err(HostError::SurfaceUnavailable(id));
        }
        Ok(())
    }

    fn load_url(&mut self, id: SurfaceId, url: &str) -> Result<(), HostError> {
        self.touch(
            id,
            HostCall::LoadUrl {
                id,
                url: url.to_string(),
            },
        );
        if self.live.contains(&id) {
            Ok(())
        } else {
            Err(HostError::SurfaceUnavailable(id))
        }
    }

    fn reload(&mut self, id: SurfaceId) -> Result<(), HostError> {
        self.touch(id, HostCall::Reload { id });
        if self.live.contains(&id) {
            Ok(())
        } else {
            Err(HostError::SurfaceUnavailable(id))
        }
    }

    fn set_zoom(&mut self, id: SurfaceId, factor: f64) {
        self.touch(id, HostCall::SetZoom { id, factor });
    }

    fn set_frame_rate(&mut self, id: SurfaceId, fps: u32) {
        self.touch(id, HostCall::SetFrameRate { id, fps });
    }

    fn set_audio_muted(&mut self, id: SurfaceId, muted: bool) {
        self.touch(id, HostCall::SetAudioMuted { id, muted });
    }

    fn focus_surface(&mut self, id: SurfaceId) {
        self.touch(id, HostCall::FocusSurface { id });
    }

    fn clear_data(&mut self, id: SurfaceId, scope: ClearScope) {
        self.touch(id, HostCall::ClearData { id, scope });
    }

    fn request_heap_report(&mut self, id: SurfaceId) {
        self.touch(id, HostCall::RequestHeapReport { id });
    }

    fn reclaim_memory(&mut self, id: SurfaceId) {
        self.touch(id, HostCall::ReclaimMemory { id });
    }

    fn collect_garbage(&mut self) {
        self.record(HostCall::CollectGarbage);
    }

    fn open_satellite(&mut self, satellite: &Satellite) -> Result<(), HostError> {
        let kind = satellite.kind();
        let bounds = match satellite {
            Satellite::Settings { bounds, .. } => *bounds,
            Satellite::ExternalLinkPrompt { bounds, .. } => *bounds,
        };
        self.satellites.insert(kind);
        self.record(HostCall::OpenSatellite { kind, bounds });
        Ok(())
    }

    fn focus_satellite(&mut self, kind: SatelliteKind) {
        self.record(HostCall::FocusSatellite { kind });
    }

    fn close_satellite(&mut self, kind: SatelliteKind) {
        self.satellites.remove(&kind);
        self.record(HostCall::CloseSatellite { kind });
    }

    fn set_satellite_background(&mut self, kind: SatelliteKind, color: &str) {
        self.record(HostCall::SetSatelliteBackground {
            kind,
            color: color.to_string(),
        });
    }

    fn open_external(&mut self, url: &str) -> Result<(), HostError> {
        self.record(HostCall::OpenExternal {
            url: url.to_string(),
        });
        if self.fail_external {
            return Err(HostError::ExternalOpenFailed(url.to_string()));
        }
        Ok(())
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn relaunch(&mut self) {
        info!("relaunch requested");
        self.relaunches += 1;
        self.record(HostCall::Relaunch);
    }
}
