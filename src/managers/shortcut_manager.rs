//! Shortcut Manager for the shell window.
//!
//! Manages keyboard shortcut bindings with conflict detection
//! and platform-specific modifier key adaptation, and resolves a pressed
//! key combination to the action bound to it.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::errors::ShortcutError;

/// Actions that can be bound to a key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutAction {
    Reload,
    ForceReload,
    DevTools,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    ToggleFullscreen,
}

impl ShortcutAction {
    pub const ALL: [ShortcutAction; 7] = [
        ShortcutAction::Reload,
        ShortcutAction::ForceReload,
        ShortcutAction::DevTools,
        ShortcutAction::ZoomIn,
        ShortcutAction::ZoomOut,
        ShortcutAction::ZoomReset,
        ShortcutAction::ToggleFullscreen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShortcutAction::Reload => "reload",
            ShortcutAction::ForceReload => "force_reload",
            ShortcutAction::DevTools => "dev_tools",
            ShortcutAction::ZoomIn => "zoom_in",
            ShortcutAction::ZoomOut => "zoom_out",
            ShortcutAction::ZoomReset => "zoom_reset",
            ShortcutAction::ToggleFullscreen => "toggle_fullscreen",
        }
    }

    fn default_keys(&self) -> &'static str {
        match self {
            ShortcutAction::Reload => "Ctrl+R",
            ShortcutAction::ForceReload => "F5",
            ShortcutAction::DevTools => "Ctrl+Shift+I",
            ShortcutAction::ZoomIn => "Ctrl+=",
            ShortcutAction::ZoomOut => "Ctrl+-",
            ShortcutAction::ZoomReset => "Ctrl+0",
            ShortcutAction::ToggleFullscreen => "F11",
        }
    }
}

impl fmt::Display for ShortcutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShortcutAction {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShortcutAction::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ShortcutError::NotFound(s.to_string()))
    }
}

/// Trait defining shortcut management operations.
pub trait ShortcutManagerTrait {
    fn register_shortcut(&mut self, action: ShortcutAction, keys: &str) -> Result<(), ShortcutError>;
    fn unregister_shortcut(&mut self, action: ShortcutAction) -> Result<(), ShortcutError>;
    fn get_shortcut(&self, action: ShortcutAction) -> Option<&str>;
    fn list_shortcuts(&self) -> &HashMap<ShortcutAction, String>;
    fn reset_to_defaults(&mut self);
    fn has_conflict(&self, keys: &str, exclude_action: Option<ShortcutAction>) -> Option<ShortcutAction>;
    fn resolve(&self, keys: &str) -> Option<ShortcutAction>;
}

/// Shortcut manager with in-memory storage and platform adaptation.
pub struct ShortcutManager {
    shortcuts: HashMap<ShortcutAction, String>,
}

impl ShortcutManager {
    pub fn new() -> Self {
        Self {
            shortcuts: Self::default_shortcuts(),
        }
    }

    pub fn default_shortcuts() -> HashMap<ShortcutAction, String> {
        ShortcutAction::ALL
            .into_iter()
            .map(|a| (a, Self::adapt_for_platform(a.default_keys())))
            .collect()
    }

    /// Adapts modifier keys for the current platform.
    fn adapt_for_platform(keys: &str) -> String {
        if cfg!(target_os = "macos") {
            keys.replace("Ctrl+", "Cmd+")
        } else {
            keys.to_string()
        }
    }

    fn same_keys(a: &str, b: &str) -> bool {
        a.eq_ignore_ascii_case(b)
    }
}

impl Default for ShortcutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortcutManagerTrait for ShortcutManager {
    fn register_shortcut(&mut self, action: ShortcutAction, keys: &str) -> Result<(), ShortcutError> {
        let keys = keys.trim();
        if keys.is_empty() || (keys.ends_with('+') && !keys.ends_with("++")) {
            return Err(ShortcutError::InvalidKeys(format!("'{}'", keys)));
        }

        if let Some(conflicting_action) = self.has_conflict(keys, Some(action)) {
            return Err(ShortcutError::Conflict(format!(
                "'{}' is already bound to '{}'",
                keys, conflicting_action
            )));
        }

        self.shortcuts.insert(action, Self::adapt_for_platform(keys));
        Ok(())
    }

    fn unregister_shortcut(&mut self, action: ShortcutAction) -> Result<(), ShortcutError> {
        self.shortcuts
            .remove(&action)
            .map(|_| ())
            .ok_or_else(|| ShortcutError::NotFound(action.to_string()))
    }

    fn get_shortcut(&self, action: ShortcutAction) -> Option<&str> {
        self.shortcuts.get(&action).map(|s| s.as_str())
    }

    fn list_shortcuts(&self) -> &HashMap<ShortcutAction, String> {
        &self.shortcuts
    }

    fn reset_to_defaults(&mut self) {
        self.shortcuts = Self::default_shortcuts();
    }

    fn has_conflict(&self, keys: &str, exclude_action: Option<ShortcutAction>) -> Option<ShortcutAction> {
        let adapted = Self::adapt_for_platform(keys);
        self.shortcuts
            .iter()
            .find(|(action, bound)| {
                Some(**action) != exclude_action && Self::same_keys(bound, &adapted)
            })
            .map(|(action, _)| *action)
    }

    fn resolve(&self, keys: &str) -> Option<ShortcutAction> {
        self.has_conflict(keys.trim(), None)
    }
}
