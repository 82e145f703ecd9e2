// Anubis Shell Settings Engine
// Loads, merges, persists and resets the session configuration.
// The configuration is stored as a pretty-printed JSON file at the platform-specific config path.

use std::fs;
use std::path::Path;

use tracing::warn;
use url::Url;

use crate::platform;
use crate::services::theme_engine::is_valid_hex_color;
use crate::types::errors::SettingsError;
use crate::types::settings::{ConfigOverrides, SessionConfig};

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<SessionConfig, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &SessionConfig;
    fn update(&mut self, overrides: &ConfigOverrides) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine implementation that persists the configuration as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: SessionConfig,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            settings: SessionConfig::default(),
        }
    }

    /// Loads the configuration, falling back to defaults on any error.
    ///
    /// Startup must never fail because of a missing or corrupt settings file.
    pub fn load_or_default(&mut self) -> SessionConfig {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %self.config_path, error = %e, "falling back to default settings");
                self.settings = SessionConfig::default();
                self.settings.clone()
            }
        }
    }
}

/// Rejects override values that would leave the configuration unusable.
pub fn validate_overrides(overrides: &ConfigOverrides) -> Result<(), SettingsError> {
    if let Some(color) = &overrides.title_bar_color {
        if !is_valid_hex_color(color) {
            return Err(SettingsError::InvalidValue(format!(
                "titleBarColor must be a hex color, got '{}'",
                color
            )));
        }
    }
    if let Some(game_url) = &overrides.game_url {
        let parsed = Url::parse(game_url)
            .map_err(|e| SettingsError::InvalidValue(format!("gameUrl '{}': {}", game_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SettingsError::InvalidValue(format!(
                "gameUrl must be http(s), got '{}'",
                game_url
            )));
        }
    }
    Ok(())
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads the configuration from the JSON config file.
    ///
    /// If the file does not exist, returns defaults.
    /// If the file exists but is malformed, returns a serialization error.
    fn load(&mut self) -> Result<SessionConfig, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.settings = SessionConfig::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: SessionConfig = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Saves the current configuration, creating parent directories as needed.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_settings(&self) -> &SessionConfig {
        &self.settings
    }

    /// Merges `overrides` into the in-memory configuration and persists it.
    ///
    /// Invalid overrides are rejected before anything changes. A failed write
    /// is returned as an error, but the merged values stay in effect.
    fn update(&mut self, overrides: &ConfigOverrides) -> Result<(), SettingsError> {
        validate_overrides(overrides)?;
        self.settings = self.settings.merged(overrides);
        self.save()
    }

    /// Resets the configuration to factory defaults and saves to disk.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = SessionConfig::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
