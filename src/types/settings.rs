use serde::{Deserialize, Serialize};

/// Default title-bar tint for dark appearance; doubles as a "follow theme" sentinel.
pub const DEFAULT_DARK_TINT: &str = "#1a1a1a";
/// Default title-bar tint for light appearance; doubles as a "follow theme" sentinel.
pub const DEFAULT_LIGHT_TINT: &str = "#f8f8f8";
pub const DEFAULT_GAME_URL: &str = "https://anubisrp.com";

/// Process-wide session configuration, persisted as a flat JSON record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    pub theme: ThemeMode,
    pub title_bar_color: String,
    pub start_fullscreen: bool,
    pub game_url: String,
    pub performance_mode: PerformanceTier,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::System,
            title_bar_color: DEFAULT_DARK_TINT.to_string(),
            start_fullscreen: false,
            game_url: DEFAULT_GAME_URL.to_string(),
            performance_mode: PerformanceTier::Balanced,
        }
    }
}

impl SessionConfig {
    /// Returns a copy with every field present in `overrides` replaced.
    pub fn merged(&self, overrides: &ConfigOverrides) -> SessionConfig {
        SessionConfig {
            theme: overrides.theme.unwrap_or(self.theme),
            title_bar_color: overrides
                .title_bar_color
                .clone()
                .unwrap_or_else(|| self.title_bar_color.clone()),
            start_fullscreen: overrides.start_fullscreen.unwrap_or(self.start_fullscreen),
            game_url: overrides
                .game_url
                .clone()
                .unwrap_or_else(|| self.game_url.clone()),
            performance_mode: overrides.performance_mode.unwrap_or(self.performance_mode),
        }
    }
}

/// A partial configuration update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigOverrides {
    pub theme: Option<ThemeMode>,
    pub title_bar_color: Option<String>,
    pub start_fullscreen: Option<bool>,
    pub game_url: Option<String>,
    pub performance_mode: Option<PerformanceTier>,
}

/// Theme mode selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

/// Named preset controlling process-launch rendering switches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Low,
    #[default]
    #[serde(alias = "optimal")]
    Balanced,
    Maximum,
}

impl PerformanceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceTier::Low => "low",
            PerformanceTier::Balanced => "balanced",
            PerformanceTier::Maximum => "maximum",
        }
    }
}
