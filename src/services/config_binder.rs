//! Session Configuration Binder.
//!
//! Owns the settings engine and the theme engine. Applies configuration
//! changes to the host appearance, persists them, and reports the effects
//! that need the controller (primary navigation, relaunch).

use tracing::{info, warn};

use crate::host::Host;
use crate::services::settings_engine::{validate_overrides, SettingsEngine, SettingsEngineTrait};
use crate::services::theme_engine::{ThemeEngine, ThemeEngineTrait};
use crate::types::errors::SettingsError;
use crate::types::settings::{ConfigOverrides, SessionConfig, DEFAULT_DARK_TINT, DEFAULT_LIGHT_TINT};
use crate::types::window::{Notification, SatelliteKind};

/// What an applied configuration change requires beyond appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyOutcome {
    /// New target URL for the primary surface, if it changed.
    pub navigate_to: Option<String>,
    /// The performance tier changed; the process must relaunch.
    pub relaunch: bool,
    /// Whether the merged configuration reached disk.
    pub persisted: bool,
}

pub struct ConfigBinder {
    engine: SettingsEngine,
    theme: ThemeEngine,
    previewing: bool,
}

impl ConfigBinder {
    /// Wraps an already-loaded settings engine.
    pub fn new(engine: SettingsEngine, system_dark: bool) -> Self {
        let theme = ThemeEngine::new(engine.get_settings().theme, system_dark);
        Self {
            engine,
            theme,
            previewing: false,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        self.engine.get_settings()
    }

    pub fn is_previewing(&self) -> bool {
        self.previewing
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    pub fn window_background(&self) -> &'static str {
        self.theme.window_background()
    }

    pub fn satellite_background(&self) -> &'static str {
        self.theme.satellite_background()
    }

    /// Merges, persists and applies a configuration change.
    ///
    /// Invalid values are rejected with nothing changed. A failed write is
    /// logged; the new values still take effect for this session.
    pub fn apply<H: Host>(
        &mut self,
        host: &mut H,
        overrides: &ConfigOverrides,
        satellites: &[SatelliteKind],
    ) -> Result<ApplyOutcome, SettingsError> {
        validate_overrides(overrides)?;
        let previous = self.engine.get_settings().clone();

        let persisted = match self.engine.update(overrides) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "settings not persisted");
                false
            }
        };

        let current = self.engine.get_settings().clone();
        self.previewing = false;
        self.apply_appearance(host, &current, satellites);

        let navigate_to = (current.game_url != previous.game_url).then(|| current.game_url.clone());
        let relaunch = current.performance_mode != previous.performance_mode;
        if relaunch {
            info!(
                from = previous.performance_mode.as_str(),
                to = current.performance_mode.as_str(),
                "performance tier changed, relaunch required"
            );
        }

        Ok(ApplyOutcome {
            navigate_to,
            relaunch,
            persisted,
        })
    }

    /// Shows tint and theme of a candidate configuration without storing it.
    pub fn preview<H: Host>(
        &mut self,
        host: &mut H,
        overrides: &ConfigOverrides,
        satellites: &[SatelliteKind],
    ) {
        let candidate = self.engine.get_settings().merged(overrides);
        self.previewing = true;
        self.apply_appearance(host, &candidate, satellites);
    }

    /// Re-applies the stored appearance, discarding any preview.
    pub fn revert<H: Host>(&mut self, host: &mut H, satellites: &[SatelliteKind]) {
        if !self.previewing {
            return;
        }
        self.previewing = false;
        let stored = self.engine.get_settings().clone();
        self.apply_appearance(host, &stored, satellites);
    }

    /// Re-reads the system appearance and re-applies the stored configuration.
    pub fn refresh_system_theme<H: Host>(&mut self, host: &mut H, satellites: &[SatelliteKind]) {
        let stored = self.engine.get_settings().clone();
        self.apply_appearance(host, &stored, satellites);
    }

    /// Theme propagation, tint recompute and window backgrounds.
    pub fn apply_appearance<H: Host>(
        &mut self,
        host: &mut H,
        config: &SessionConfig,
        satellites: &[SatelliteKind],
    ) {
        host.set_theme_source(config.theme);
        self.theme.set_theme(config.theme);
        self.theme.set_system_dark(host.prefers_dark());

        let tint = self.resolve_tint(&config.title_bar_color);
        host.notify(Notification::UpdateColors { color: tint });
        host.set_window_background(self.theme.window_background());
        for kind in satellites {
            host.set_satellite_background(*kind, self.theme.satellite_background());
        }
    }

    pub fn resolve_tint(&self, stored: &str) -> String {
        self.theme.resolve_tint(stored).unwrap_or_else(|e| {
            warn!(error = %e, "falling back to default tint");
            if self.theme.is_dark() {
                DEFAULT_DARK_TINT.to_string()
            } else {
                DEFAULT_LIGHT_TINT.to_string()
            }
        })
    }
}
