//! Window commands from the title bar and satellites, and navigation routing.

use tracing::{debug, info, warn};

use super::Controller;
use crate::host::Host;
use crate::managers::shortcut_manager::{ShortcutAction, ShortcutManagerTrait};
use crate::managers::surface_registry::SurfaceRegistryTrait;
use crate::managers::window_manager::{SatelliteOpen, WindowManagerTrait};
use crate::services::navigation_policy::NavigationRoute;
use crate::types::errors::{ControllerError, SurfaceError};
use crate::types::settings::ConfigOverrides;
use crate::types::surface::{ClearScope, SurfaceId};
use crate::types::window::{
    NavigationDecision, Notification, Satellite, SatelliteKind, WindowCommand,
};

pub const ZOOM_STEP: f64 = 0.1;
pub const MIN_ZOOM: f64 = 0.3;
pub const MAX_ZOOM: f64 = 3.0;
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Clamps to the zoom range and rounds to one decimal.
pub fn normalize_zoom(factor: f64) -> f64 {
    ((factor.clamp(MIN_ZOOM, MAX_ZOOM)) * 10.0).round() / 10.0
}

impl<H: Host> Controller<H> {
    pub fn handle_command(&mut self, cmd: WindowCommand) -> Result<(), ControllerError> {
        self.ensure_open()?;
        debug!(?cmd, "window command");
        match cmd {
            WindowCommand::Minimize => self.host.minimize(),
            WindowCommand::Maximize => self.toggle_maximize(),
            WindowCommand::Close => self.shutdown(),
            WindowCommand::Reload => self.manual_reload(SurfaceId::Primary),
            WindowCommand::ClearCache => self.host.clear_data(SurfaceId::Primary, ClearScope::Cache),
            WindowCommand::ClearCookies => {
                self.host.clear_data(SurfaceId::Primary, ClearScope::Cookies)
            }
            WindowCommand::OpenSettings => self.open_settings(),
            WindowCommand::CloseSettings => self.close_satellite(SatelliteKind::Settings),
            WindowCommand::DismissSatellites => {
                self.close_satellite(SatelliteKind::ExternalLinkPrompt);
                self.close_satellite(SatelliteKind::Settings);
            }
            WindowCommand::ToggleFullscreen { fullscreen } => {
                self.host.set_fullscreen(fullscreen);
                self.window.set_fullscreen(fullscreen);
                self.recompute_geometry();
            }
            WindowCommand::ZoomIn => self.zoom_active(|z| z + ZOOM_STEP),
            WindowCommand::ZoomOut => self.zoom_active(|z| z - ZOOM_STEP),
            WindowCommand::ZoomReset => self.zoom_active(|_| DEFAULT_ZOOM),
            WindowCommand::OpenDevTools => self.host.open_devtools(),
            WindowCommand::OpenExternalLink { url } => self.open_external_link(&url)?,
            WindowCommand::CloseTab { id } => {
                self.close_tab(id);
            }
            WindowCommand::SwitchTab { id } => match self.switch_to(id) {
                Ok(()) => {}
                Err(ControllerError::Surface(SurfaceError::NotFound(id))) => {
                    debug!(surface = %id, "switch to unknown surface ignored");
                }
                Err(e) => return Err(e),
            },
            WindowCommand::PreviewSettings { settings } => {
                let satellites = self.window.open_satellites();
                self.binder.preview(&mut self.host, &settings, &satellites);
            }
            WindowCommand::UpdateSettings { settings } => self.apply_config(&settings)?,
            WindowCommand::Shortcut { keys } => match self.shortcuts.resolve(&keys) {
                Some(action) => {
                    let cmd = self.command_for(action);
                    return self.handle_command(cmd);
                }
                None => debug!(keys = %keys, "no action bound"),
            },
            WindowCommand::RebindShortcut { action, keys } => {
                self.shortcuts.register_shortcut(action, &keys)?;
                info!(%action, keys = %keys, "shortcut rebound");
            }
            WindowCommand::UnbindShortcut { action } => self.shortcuts.unregister_shortcut(action)?,
            WindowCommand::ResetShortcuts => self.shortcuts.reset_to_defaults(),
        }
        Ok(())
    }

    /// Applies a configuration change: appearance now, then navigation of
    /// the primary surface or a relaunch if the change calls for one.
    pub fn apply_config(&mut self, overrides: &ConfigOverrides) -> Result<(), ControllerError> {
        self.ensure_open()?;
        let satellites = self.window.open_satellites();
        let outcome = self.binder.apply(&mut self.host, overrides, &satellites)?;

        if let Some(url) = outcome.navigate_to {
            info!(url = %url, "game url changed");
            self.navigation.set_game_url(&url);
            self.registry.primary_mut().url = url.clone();
            if let Err(e) = self.host.load_url(SurfaceId::Primary, &url) {
                warn!(error = %e, "failed to navigate primary surface");
            }
        }
        if outcome.relaunch {
            self.shutdown();
            self.host.relaunch();
        }
        Ok(())
    }

    /// Decides whether a top-level navigation may proceed. Only the primary
    /// surface is confined to the configured origin.
    pub fn will_navigate(&mut self, surface: SurfaceId, url: &str) -> NavigationDecision {
        if self.closed || !self.registry.contains(surface) {
            return NavigationDecision::Cancel;
        }
        if !surface.is_primary() {
            return NavigationDecision::Allow;
        }
        match self.navigation.route_navigation(url) {
            NavigationRoute::Allow => NavigationDecision::Allow,
            route => {
                self.follow_route(route);
                NavigationDecision::Cancel
            }
        }
    }

    /// A page asked for a new window. No window is ever created; the URL is
    /// re-routed instead.
    pub fn new_window_requested(&mut self, surface: SurfaceId, url: &str) {
        if self.closed || !self.registry.contains(surface) {
            return;
        }
        let route = self.navigation.route_popup(url);
        self.follow_route(route);
    }

    /// Asks the user whether `url` may be opened. Focuses the prompt if it
    /// is already showing.
    pub fn show_external_prompt(&mut self, url: &str) {
        if self.closed {
            return;
        }
        match self.window.open_satellite(SatelliteKind::ExternalLinkPrompt) {
            SatelliteOpen::Focus => self.host.focus_satellite(SatelliteKind::ExternalLinkPrompt),
            SatelliteOpen::Create(bounds) => {
                self.close_satellite(SatelliteKind::Settings);
                let prompt = Satellite::ExternalLinkPrompt {
                    url: url.to_string(),
                    bounds,
                };
                self.open_satellite_window(&prompt);
            }
        }
    }

    fn follow_route(&mut self, route: NavigationRoute) {
        match route {
            NavigationRoute::Allow => {}
            NavigationRoute::NavigatePrimary(url) => {
                if let Err(e) = self.host.load_url(SurfaceId::Primary, &url) {
                    warn!(error = %e, url = %url, "popup navigation failed");
                }
            }
            NavigationRoute::Handoff(url) => self.hand_off(&url),
            NavigationRoute::Prompt(url) => self.show_external_prompt(&url),
            NavigationRoute::OpenTab(url) => {
                if let Err(e) = self.create_tab_surface(&url) {
                    warn!(error = %e, url = %url, "failed to open tab");
                }
            }
            NavigationRoute::Reject => debug!("navigation rejected"),
        }
    }

    fn open_external_link(&mut self, url: &str) -> Result<(), ControllerError> {
        self.close_satellite(SatelliteKind::ExternalLinkPrompt);
        match self.navigation.route_external_link(url) {
            NavigationRoute::OpenTab(url) => {
                self.create_tab_surface(&url)?;
            }
            NavigationRoute::Reject => warn!(url, "refusing to open non-web link"),
            route => self.follow_route(route),
        }
        Ok(())
    }

    fn hand_off(&mut self, url: &str) {
        info!(url, "opening in system browser");
        if let Err(e) = self.host.open_external(url) {
            warn!(error = %e, "system browser handoff failed");
        }
    }

    fn toggle_maximize(&mut self) {
        let maximize = !self.window.is_maximized();
        if maximize {
            self.host.maximize();
        } else {
            self.host.unmaximize();
        }
        self.window.set_maximized(maximize);
        self.recompute_geometry();
    }

    fn open_settings(&mut self) {
        match self.window.open_satellite(SatelliteKind::Settings) {
            SatelliteOpen::Focus => self.host.focus_satellite(SatelliteKind::Settings),
            SatelliteOpen::Create(bounds) => {
                let settings = Satellite::Settings {
                    config: self.binder.config().clone(),
                    bounds,
                };
                self.open_satellite_window(&settings);
            }
        }
    }

    fn open_satellite_window(&mut self, satellite: &Satellite) {
        let kind = satellite.kind();
        if let Err(e) = self.host.open_satellite(satellite) {
            warn!(?kind, error = %e, "failed to open satellite window");
            self.window.close_satellite(kind);
            return;
        }
        let background = self.binder.satellite_background();
        self.host.set_satellite_background(kind, background);
    }

    /// Closes a satellite if open. Closing settings drops any preview.
    fn close_satellite(&mut self, kind: SatelliteKind) {
        if !self.window.close_satellite(kind) {
            return;
        }
        self.host.close_satellite(kind);
        if kind == SatelliteKind::Settings {
            let satellites = self.window.open_satellites();
            self.binder.revert(&mut self.host, &satellites);
        }
    }

    fn zoom_active(&mut self, step: impl Fn(f64) -> f64) {
        let active = self.registry.active();
        let Some(record) = self.registry.get_mut(active) else {
            return;
        };
        let factor = normalize_zoom(step(record.zoom));
        record.zoom = factor;
        self.host.set_zoom(active, factor);
        self.host.notify(Notification::ZoomChanged { factor });
    }

    fn command_for(&self, action: ShortcutAction) -> WindowCommand {
        match action {
            ShortcutAction::Reload | ShortcutAction::ForceReload => WindowCommand::Reload,
            ShortcutAction::DevTools => WindowCommand::OpenDevTools,
            ShortcutAction::ZoomIn => WindowCommand::ZoomIn,
            ShortcutAction::ZoomOut => WindowCommand::ZoomOut,
            ShortcutAction::ZoomReset => WindowCommand::ZoomReset,
            ShortcutAction::ToggleFullscreen => WindowCommand::ToggleFullscreen {
                fullscreen: !self.window.is_fullscreen(),
            },
        }
    }
}
