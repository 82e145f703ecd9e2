//! Theme Engine: resolves the effective appearance, the title-bar tint and
//! the window backgrounds from the configured theme and the system preference.

use crate::types::errors::ThemeError;
use crate::types::settings::{ThemeMode, DEFAULT_DARK_TINT, DEFAULT_LIGHT_TINT};

const DARK_WINDOW_BACKGROUND: &str = "#202020";
const LIGHT_WINDOW_BACKGROUND: &str = "#ffffff";

/// Trait defining the theme engine interface.
pub trait ThemeEngineTrait {
    fn set_theme(&mut self, mode: ThemeMode);
    fn get_theme(&self) -> ThemeMode;
    fn set_system_dark(&mut self, dark: bool);
    fn is_dark(&self) -> bool;
    fn resolve_tint(&self, stored: &str) -> Result<String, ThemeError>;
    fn window_background(&self) -> &'static str;
    fn satellite_background(&self) -> &'static str;
}

/// Validates a hex color string (e.g. "#1a1a1a" or "#fff").
pub fn is_valid_hex_color(color: &str) -> bool {
    let Some(hex) = color.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Whether `color` is one of the built-in tints that mean "follow the theme".
pub fn is_default_tint(color: &str) -> bool {
    color.is_empty()
        || color.eq_ignore_ascii_case(DEFAULT_DARK_TINT)
        || color.eq_ignore_ascii_case(DEFAULT_LIGHT_TINT)
}

/// The theme engine implementation.
pub struct ThemeEngine {
    current_theme: ThemeMode,
    system_dark: bool,
}

impl ThemeEngine {
    pub fn new(mode: ThemeMode, system_dark: bool) -> Self {
        Self {
            current_theme: mode,
            system_dark,
        }
    }
}

impl ThemeEngineTrait for ThemeEngine {
    fn set_theme(&mut self, mode: ThemeMode) {
        self.current_theme = mode;
    }

    fn get_theme(&self) -> ThemeMode {
        self.current_theme
    }

    fn set_system_dark(&mut self, dark: bool) {
        self.system_dark = dark;
    }

    fn is_dark(&self) -> bool {
        match self.current_theme {
            ThemeMode::Dark => true,
            ThemeMode::Light => false,
            ThemeMode::System => self.system_dark,
        }
    }

    /// Returns the tint to paint the title bar with.
    ///
    /// A stored default tint follows the effective theme; any other valid
    /// color is used as is.
    fn resolve_tint(&self, stored: &str) -> Result<String, ThemeError> {
        if is_default_tint(stored) {
            let tint = if self.is_dark() {
                DEFAULT_DARK_TINT
            } else {
                DEFAULT_LIGHT_TINT
            };
            return Ok(tint.to_string());
        }
        if !is_valid_hex_color(stored) {
            return Err(ThemeError::InvalidColor(stored.to_string()));
        }
        Ok(stored.to_string())
    }

    fn window_background(&self) -> &'static str {
        if self.is_dark() {
            DARK_WINDOW_BACKGROUND
        } else {
            LIGHT_WINDOW_BACKGROUND
        }
    }

    fn satellite_background(&self) -> &'static str {
        if self.is_dark() {
            DEFAULT_DARK_TINT
        } else {
            DEFAULT_LIGHT_TINT
        }
    }
}
