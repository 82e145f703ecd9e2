//! Surface lifecycle: tab creation and teardown, lifecycle signals and the
//! recovery path.

use tracing::{debug, error, info, warn};

use super::Controller;
use crate::host::Host;
use crate::managers::surface_registry::SurfaceRegistryTrait;
use crate::services::crash_recovery::{CrashRecoveryTrait, RecoveryDecision};
use crate::services::scheduler::{Task, TimerId};
use crate::types::errors::{ControllerError, SurfaceError};
use crate::types::surface::{
    ClearScope, LoadFailure, RenderExitReason, SurfaceId, SurfaceOptions, SurfaceSignal,
    SurfaceState, TabId,
};
use crate::types::window::Notification;

/// Progress reported to the title bar when a load starts.
pub const LOAD_STARTED_PROGRESS: f64 = 0.1;

impl<H: Host> Controller<H> {
    /// Opens `url` in a new tab surface and makes it active.
    pub fn create_tab_surface(&mut self, url: &str) -> Result<TabId, ControllerError> {
        self.ensure_open()?;
        let id = self.registry.peek_next_tab_id();
        let surface = SurfaceId::Tab(id);
        let options = SurfaceOptions::tab(url);
        self.host
            .create_surface(surface, &options)
            .map_err(|e| SurfaceError::CreationFailed(e.to_string()))?;

        let created = self.registry.create_tab(url);
        debug_assert_eq!(created, id);
        self.recovery.track(surface);
        self.host.set_audio_muted(surface, options.audio_muted);
        self.host.set_frame_rate(surface, options.frame_rate);
        self.host.attach_surface(surface);
        self.recompute_geometry();

        if let Err(e) = self.host.load_url(surface, url) {
            warn!(surface = %surface, error = %e, "tab load failed to start");
        }
        info!(surface = %surface, url, "tab opened");
        self.host.notify(Notification::TabCreated {
            id,
            title: url.to_string(),
        });
        Ok(id)
    }

    /// Closes a tab. Unknown or already-closed ids are a no-op.
    /// Returns whether a tab was closed.
    pub fn close_tab(&mut self, id: TabId) -> bool {
        if self.closed {
            return false;
        }
        let surface = SurfaceId::Tab(id);
        if !self.registry.contains(surface) {
            debug!(surface = %surface, "close for unknown tab ignored");
            return false;
        }

        let was_active = self.registry.active() == surface;
        self.release_surface(surface);
        self.registry.close_tab(id);
        self.host.notify(Notification::TabClosed { id });

        if was_active {
            self.host.attach_surface(SurfaceId::Primary);
            self.recompute_geometry();
        }
        true
    }

    /// Makes `id` the visible surface. No-op if it already is.
    pub fn switch_to(&mut self, id: SurfaceId) -> Result<(), ControllerError> {
        self.ensure_open()?;
        if self.registry.switch_to(id)? {
            self.host.attach_surface(id);
            self.recompute_geometry();
        }
        Ok(())
    }

    /// Destroys every surface, tabs first, without per-surface layout.
    pub fn close_all(&mut self) {
        let ids = self.registry.surface_ids();
        for id in &ids {
            self.release_surface(*id);
        }
        self.registry.drain_all();
        debug!(count = ids.len(), "all surfaces released");
    }

    /// Host-side teardown of one surface: cancel its recovery timer, stop
    /// its events, take it off the window, release it.
    fn release_surface(&mut self, id: SurfaceId) {
        if let Some(timer) = self.recovery.forget(id) {
            self.timers.cancel(timer);
        }
        self.host.detach_observers(id);
        self.host.detach_surface(id);
        if let Err(e) = self.host.destroy_surface(id) {
            warn!(surface = %id, error = %e, "surface destroy failed");
        }
    }

    /// Dispatches a lifecycle or telemetry signal from a surface.
    pub fn handle_surface_signal(&mut self, id: SurfaceId, signal: SurfaceSignal) {
        if self.closed {
            return;
        }
        if !self.registry.contains(id) {
            debug!(surface = %id, ?signal, "signal for unknown surface dropped");
            return;
        }
        match signal {
            SurfaceSignal::LoadStarted => self.on_load_started(id),
            SurfaceSignal::LoadFinished => self.on_load_finished(id),
            SurfaceSignal::LoadFailed(failure) => self.on_load_failed(id, failure),
            SurfaceSignal::RenderProcessGone { reason } => self.on_render_process_gone(id, reason),
            SurfaceSignal::TitleUpdated { title } => self.on_title_updated(id, title),
            SurfaceSignal::HeapReport { used_bytes } => self.on_heap_report(id, used_bytes),
            SurfaceSignal::DataCleared { scope, ok } => self.on_data_cleared(id, scope, ok),
        }
    }

    fn on_load_started(&mut self, id: SurfaceId) {
        if let Some(record) = self.registry.get_mut(id) {
            record.transition(SurfaceState::Loading);
        }
        if self.registry.active() == id {
            self.host.notify(Notification::LoadingProgress {
                progress: LOAD_STARTED_PROGRESS,
            });
        }
    }

    fn on_load_finished(&mut self, id: SurfaceId) {
        let Some(record) = self.registry.get_mut(id) else {
            return;
        };
        if matches!(
            record.state,
            SurfaceState::Crashed | SurfaceState::Failed | SurfaceState::Terminal
        ) {
            debug!(surface = %id, state = ?record.state, "load finished after a failure, not marking ready");
            return;
        }
        if !record.state.is_loading() {
            record.transition(SurfaceState::Loading);
        }
        record.transition(SurfaceState::Ready);
        let (frame_rate, zoom) = (record.frame_rate, record.zoom);

        if let Some(timer) = self.recovery.record_success(id) {
            debug!(surface = %id, "loaded before the scheduled retry, cancelling it");
            self.timers.cancel(timer);
        }
        self.host.set_frame_rate(id, frame_rate);
        self.host.set_zoom(id, zoom);
        if self.registry.active() == id {
            self.host
                .notify(Notification::LoadingProgress { progress: 1.0 });
        }
    }

    fn on_load_failed(&mut self, id: SurfaceId, failure: LoadFailure) {
        if !self.recovery.is_recoverable_failure(&failure) {
            debug!(surface = %id, code = failure.code, main_frame = failure.main_frame, "benign load failure ignored");
            return;
        }
        warn!(
            surface = %id,
            code = failure.code,
            description = %failure.description,
            url = %failure.url,
            "load failed"
        );
        if let Some(record) = self.registry.get_mut(id) {
            record.transition(SurfaceState::Failed);
        }
        self.begin_recovery(id);
    }

    fn on_render_process_gone(&mut self, id: SurfaceId, reason: RenderExitReason) {
        if !self.recovery.is_recoverable_exit(reason) {
            info!(surface = %id, ?reason, "renderer exited, not recovering");
            return;
        }
        error!(surface = %id, ?reason, "renderer gone");
        if let Some(record) = self.registry.get_mut(id) {
            record.transition(SurfaceState::Crashed);
        }
        self.begin_recovery(id);
    }

    fn on_title_updated(&mut self, id: SurfaceId, title: String) {
        if let Some(record) = self.registry.get_mut(id) {
            record.title = title.clone();
        }
        if let SurfaceId::Tab(tab) = id {
            self.host.notify(Notification::TabUpdated { id: tab, title });
        }
    }

    fn on_heap_report(&mut self, id: SurfaceId, used_bytes: u64) {
        if self.pressure.heap_exceeds_threshold(used_bytes) {
            info!(surface = %id, used_bytes, "heap above threshold, requesting reclaim");
            self.host.reclaim_memory(id);
        }
    }

    /// Completion of an asynchronous browsing-data clear.
    fn on_data_cleared(&mut self, id: SurfaceId, scope: ClearScope, ok: bool) {
        if !ok {
            warn!(surface = %id, ?scope, "clearing browsing data failed");
        }
        match scope {
            ClearScope::Cache => {
                self.host.collect_garbage();
                self.reload_surface(id);
            }
            ClearScope::Cookies => self.reload_surface(id),
            ClearScope::ServiceWorkers => {}
        }
    }

    fn reload_surface(&mut self, id: SurfaceId) {
        if let Err(e) = self.host.reload(id) {
            warn!(surface = %id, error = %e, "reload failed");
        }
    }

    /// User-initiated reload. Clears any terminal recovery state.
    pub(super) fn manual_reload(&mut self, id: SurfaceId) {
        let Some(record) = self.registry.get_mut(id) else {
            return;
        };
        if matches!(record.state, SurfaceState::Crashed | SurfaceState::Failed) {
            record.transition(SurfaceState::Recovering);
        }
        if let Some(timer) = self.recovery.reset(id) {
            self.timers.cancel(timer);
        }
        self.reload_surface(id);
    }

    /// Feeds one counted failure into the recovery policy.
    pub(super) fn begin_recovery(&mut self, id: SurfaceId) {
        let now = self.host.now();
        match self.recovery.record_failure(id, now) {
            RecoveryDecision::Retry { attempt, delay } => {
                let timer = self.timers.schedule(now + delay, Task::Recover(id));
                self.recovery.arm(id, timer);
                warn!(surface = %id, attempt, delay_ms = delay.as_millis() as u64, "recovery scheduled");
            }
            RecoveryDecision::Exhausted { attempts } => {
                if let Some(record) = self.registry.get_mut(id) {
                    record.transition(SurfaceState::Terminal);
                }
                error!(surface = %id, attempts, "recovery exhausted");
                self.host
                    .notify(Notification::RecoveryExhausted { surface: id });
            }
            RecoveryDecision::AlreadyPending => {
                debug!(surface = %id, "recovery already pending");
            }
            RecoveryDecision::Terminal => {
                debug!(surface = %id, "surface is terminal, no recovery");
            }
            RecoveryDecision::Untracked => {
                debug!(surface = %id, "failure on untracked surface");
            }
        }
    }

    /// A recovery timer fired.
    pub(super) fn fire_recovery(&mut self, timer: TimerId, id: SurfaceId) {
        if !self.recovery.take_pending(id, timer) {
            debug!(surface = %id, "stale recovery timer");
            return;
        }
        let Some(record) = self.registry.get_mut(id) else {
            return;
        };
        if record.state.is_loading() {
            debug!(surface = %id, "surface is loading, skipping recovery reload");
            return;
        }
        record.transition(SurfaceState::Recovering);
        info!(surface = %id, attempt = self.recovery.state(id).map(|s| s.attempts).unwrap_or(0), "recovering surface");
        self.reload_surface(id);
    }
}
