//! Window and process events, and the periodic pressure and heap tasks.

use tracing::{debug, info, warn};

use super::Controller;
use crate::host::Host;
use crate::managers::surface_registry::SurfaceRegistryTrait;
use crate::managers::window_manager::WindowManagerTrait;
use crate::types::memory::PressureLevel;
use crate::types::surface::{ClearScope, SurfaceId, SurfaceState};
use crate::types::window::{Notification, ProcessEvent, SatelliteKind, WindowEvent};

impl<H: Host> Controller<H> {
    /// Applies a geometry, mode or lifecycle event of the root window.
    pub fn handle_window_event(&mut self, event: WindowEvent) {
        if self.closed {
            return;
        }
        match event {
            WindowEvent::Resized { bounds } | WindowEvent::Moved { bounds } => {
                self.window.set_bounds(bounds);
                self.recompute_geometry();
            }
            WindowEvent::Maximized => {
                self.window.set_maximized(true);
                self.recompute_geometry();
            }
            WindowEvent::Unmaximized => {
                self.window.set_maximized(false);
                self.recompute_geometry();
            }
            WindowEvent::EnteredFullscreen => {
                self.window.set_fullscreen(true);
                self.host
                    .notify(Notification::FullscreenChanged { fullscreen: true });
                self.recompute_geometry();
            }
            WindowEvent::LeftFullscreen => {
                self.window.set_fullscreen(false);
                self.host
                    .notify(Notification::FullscreenChanged { fullscreen: false });
                self.recompute_geometry();
            }
            WindowEvent::Minimized => {
                self.window.set_minimized(true);
                self.host.collect_garbage();
            }
            WindowEvent::Focused => {
                self.window.set_minimized(false);
                self.recompute_geometry();
                let active = self.registry.active();
                self.host.focus_surface(active);
            }
            WindowEvent::ThemeUpdated => {
                let satellites = self.window.open_satellites();
                self.binder.refresh_system_theme(&mut self.host, &satellites);
                self.recompute_geometry();
            }
            WindowEvent::ReadyToShow => {
                self.recompute_geometry();
                if self.binder.config().start_fullscreen {
                    self.host.maximize();
                }
                self.host.show();
                self.host.focus_window();
            }
            WindowEvent::CloseRequested => self.shutdown(),
            WindowEvent::SatelliteClosed { kind } => {
                self.window.close_satellite(kind);
                if kind == SatelliteKind::Settings {
                    let satellites = self.window.open_satellites();
                    self.binder.revert(&mut self.host, &satellites);
                }
            }
        }
    }

    pub fn handle_process_event(&mut self, event: ProcessEvent) {
        if self.closed {
            return;
        }
        match event {
            ProcessEvent::GpuProcessGone => {
                warn!("gpu process gone");
                if let Some(record) = self.registry.get_mut(SurfaceId::Primary) {
                    record.transition(SurfaceState::Crashed);
                    self.begin_recovery(SurfaceId::Primary);
                }
            }
        }
    }

    /// Samples system memory and mitigates according to the pressure level.
    pub(super) fn sample_pressure(&mut self) {
        let info = self.host.memory_info();
        match self.pressure.evaluate(info) {
            PressureLevel::Normal => {}
            PressureLevel::Warning => {
                let primary_loading = self
                    .registry
                    .get(SurfaceId::Primary)
                    .map(|r| r.state.is_loading())
                    .unwrap_or(true);
                if primary_loading {
                    debug!("memory warning while primary is loading, skipping cache clear");
                    return;
                }
                info!(free_kib = info.free_kib, "memory warning, clearing service workers");
                self.host
                    .clear_data(SurfaceId::Primary, ClearScope::ServiceWorkers);
            }
            PressureLevel::Emergency => {
                let victims = self
                    .pressure
                    .plan_eviction(self.registry.background_tabs(), self.registry.active());
                warn!(
                    free_kib = info.free_kib,
                    evicting = victims.len(),
                    "memory emergency, evicting background tabs"
                );
                for tab in victims {
                    if !self.close_tab(tab) {
                        debug!(surface = %tab, "tab already gone during eviction");
                    }
                }
                self.host.collect_garbage();
            }
        }
    }

    /// Asks the active surface for its heap usage unless it is loading.
    pub(super) fn probe_heap(&mut self) {
        let active = self.registry.active();
        match self.registry.get(active) {
            Some(record) if !record.state.is_loading() => self.host.request_heap_report(active),
            Some(_) => debug!(surface = %active, "skipping heap probe while loading"),
            None => {}
        }
    }
}
