//! View and session lifecycle controller.
//!
//! One owned aggregate holds the window state, the surface registry, the
//! recovery and pressure monitors, the configuration binder and the timer
//! queue. All inbound events (window commands, surface signals, window and
//! process events, fired timers) are dispatched through it on one thread.
//! Every handler looks the target surface up again before touching it, so
//! nothing ever acts on a destroyed surface.

mod commands;
mod events;
mod surfaces;

use std::time::Instant;

use tracing::{info, warn};

use crate::host::Host;
use crate::managers::shortcut_manager::ShortcutManager;
use crate::managers::surface_registry::{SurfaceRecord, SurfaceRegistry, SurfaceRegistryTrait};
use crate::managers::window_manager::{WindowManager, WindowManagerTrait};
use crate::services::config_binder::ConfigBinder;
use crate::services::crash_recovery::{CrashRecovery, CrashRecoveryTrait, RecoveryPolicy};
use crate::services::navigation_policy::NavigationPolicy;
use crate::services::pressure_monitor::{PressureMonitor, HEAP_PROBE_INTERVAL};
use crate::services::scheduler::{Task, TimerId, TimerQueue};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::{ControllerError, SurfaceError};
use crate::types::geometry::Rect;
use crate::types::settings::SessionConfig;
use crate::types::surface::{SurfaceId, SurfaceOptions};

pub struct Controller<H: Host> {
    host: H,
    window: WindowManager,
    registry: SurfaceRegistry,
    recovery: CrashRecovery,
    pressure: PressureMonitor,
    binder: ConfigBinder,
    navigation: NavigationPolicy,
    shortcuts: ShortcutManager,
    timers: TimerQueue,
    sample_timer: Option<TimerId>,
    probe_timer: Option<TimerId>,
    started: bool,
    closed: bool,
}

impl<H: Host> Controller<H> {
    /// Builds the controller around a host and an already-loaded settings engine.
    /// Nothing is created on the host until `start`.
    pub fn new(host: H, settings: SettingsEngine) -> Self {
        Self::with_policy(host, settings, RecoveryPolicy::default())
    }

    pub fn with_policy(host: H, settings: SettingsEngine, policy: RecoveryPolicy) -> Self {
        let game_url = settings.get_settings().game_url.clone();
        let work_area = host.work_area(Rect::default());
        let pressure = PressureMonitor::for_memory(host.memory_info());
        let binder = ConfigBinder::new(settings, host.prefers_dark());
        Self {
            window: WindowManager::centered_in(work_area),
            registry: SurfaceRegistry::new(&game_url),
            recovery: CrashRecovery::new(policy),
            pressure,
            binder,
            navigation: NavigationPolicy::new(&game_url),
            shortcuts: ShortcutManager::new(),
            timers: TimerQueue::new(),
            sample_timer: None,
            probe_timer: None,
            started: false,
            closed: false,
            host,
        }
    }

    /// Creates the primary surface, applies the stored appearance and arms
    /// the periodic monitors. The window is shown on `ReadyToShow`.
    pub fn start(&mut self) -> Result<(), ControllerError> {
        self.ensure_open()?;
        if self.started {
            return Ok(());
        }

        self.host.set_window_bounds(self.window.bounds());
        self.binder.refresh_system_theme(&mut self.host, &[]);

        let url = self.binder.config().game_url.clone();
        let options = SurfaceOptions::primary(&url);
        self.host
            .create_surface(SurfaceId::Primary, &options)
            .map_err(|e| SurfaceError::CreationFailed(e.to_string()))?;
        self.recovery.track(SurfaceId::Primary);
        self.host.set_audio_muted(SurfaceId::Primary, options.audio_muted);
        self.host.set_frame_rate(SurfaceId::Primary, options.frame_rate);
        self.host.attach_surface(SurfaceId::Primary);
        self.recompute_geometry();

        if let Err(e) = self.host.load_url(SurfaceId::Primary, &url) {
            warn!(error = %e, url = %url, "initial load of primary surface failed");
        }

        let now = self.host.now();
        self.sample_timer = Some(
            self.timers
                .schedule(now + self.pressure.interval(), Task::PressureSample),
        );
        self.probe_timer = Some(self.timers.schedule(now + HEAP_PROBE_INTERVAL, Task::HeapProbe));

        info!(
            url = %url,
            tier = ?self.pressure.tier(),
            performance = self.binder.config().performance_mode.as_str(),
            "controller started"
        );
        self.started = true;
        Ok(())
    }

    /// Fires every timer due at the host's current time.
    pub fn tick(&mut self) {
        if self.closed {
            return;
        }
        let now = self.host.now();
        for (timer, task) in self.timers.pop_due(now) {
            if self.closed {
                break;
            }
            match task {
                Task::Recover(id) => self.fire_recovery(timer, id),
                Task::PressureSample => {
                    self.sample_pressure();
                    if !self.closed {
                        let due = self.host.now() + self.pressure.interval();
                        self.sample_timer = Some(self.timers.schedule(due, Task::PressureSample));
                    }
                }
                Task::HeapProbe => {
                    self.probe_heap();
                    if !self.closed {
                        let due = self.host.now() + HEAP_PROBE_INTERVAL;
                        self.probe_timer = Some(self.timers.schedule(due, Task::HeapProbe));
                    }
                }
            }
        }
    }

    /// When the next timer is due, for the embedding loop to sleep until.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.closed {
            return None;
        }
        self.timers.next_deadline()
    }

    /// Lays out the active surface for the current window state.
    pub fn recompute_geometry(&mut self) {
        if self.closed {
            return;
        }
        let work_area = self.host.work_area(self.window.bounds());
        let layout = self.window.layout(work_area);
        if let Some(snapped) = layout.window {
            self.host.set_window_bounds(snapped);
        }
        let active = self.registry.active();
        if self.registry.contains(active) {
            self.host.set_surface_bounds(active, layout.surface);
        }
    }

    /// Tears down every surface and the window. Pending timers are dropped.
    pub fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        info!(tabs = self.registry.tab_count(), "shutting down");
        for kind in self.window.open_satellites() {
            self.window.close_satellite(kind);
            self.host.close_satellite(kind);
        }
        self.close_all();
        if let Some(timer) = self.sample_timer.take() {
            self.timers.cancel(timer);
        }
        if let Some(timer) = self.probe_timer.take() {
            self.timers.cancel(timer);
        }
        self.timers.clear();
        self.closed = true;
        self.host.close_window();
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn registry(&self) -> &SurfaceRegistry {
        &self.registry
    }

    pub fn window(&self) -> &WindowManager {
        &self.window
    }

    pub fn recovery(&self) -> &CrashRecovery {
        &self.recovery
    }

    pub fn pressure(&self) -> &PressureMonitor {
        &self.pressure
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn config(&self) -> &SessionConfig {
        self.binder.config()
    }

    pub fn shortcuts(&self) -> &ShortcutManager {
        &self.shortcuts
    }

    pub fn active_surface(&self) -> SurfaceId {
        self.registry.active()
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&SurfaceRecord> {
        self.registry.get(id)
    }

    fn ensure_open(&self) -> Result<(), ControllerError> {
        if self.closed {
            return Err(ControllerError::Closed);
        }
        Ok(())
    }
}
