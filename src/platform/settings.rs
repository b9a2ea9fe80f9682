//! Widget settings persisted as JSON.
//!
//! Settings live in `%APPDATA%\AudioWidget\widget_settings.json`. A missing or
//! unreadable file yields the defaults; missing keys take their default.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const APP_DIR: &str = "AudioWidget";
pub const SETTINGS_FILE: &str = "widget_settings.json";

/// User preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    /// Hex color behind the controls, e.g. `#2E2E2E`
    pub background_color: String,

    /// 0.0 to 1.0
    pub background_opacity: f32,

    /// Hex color of the control panel
    pub buttons_color: String,

    /// 0.0 to 1.0
    pub buttons_opacity: f32,

    /// Start application when Windows starts
    pub autostart: bool,

    /// Window position at last close
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<[i32; 2]>,
}

impl WidgetSettings {
    pub const DEFAULT_COLOR: &'static str = "#2E2E2E";
    pub const DEFAULT_BACKGROUND_OPACITY: f32 = 0.6;
    pub const DEFAULT_BUTTONS_OPACITY: f32 = 0.9;
    /// Lowest opacity the customization dialog allows for the controls.
    pub const MIN_BUTTONS_OPACITY: f32 = 0.2;
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            background_color: Self::DEFAULT_COLOR.to_string(),
            background_opacity: Self::DEFAULT_BACKGROUND_OPACITY,
            buttons_color: Self::DEFAULT_COLOR.to_string(),
            buttons_opacity: Self::DEFAULT_BUTTONS_OPACITY,
            autostart: false,
            position: None,
        }
    }
}

/// Settings service error types.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings from {path}: {source}")]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save settings to {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// JSON file backed settings store.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default per-user location, falling back to the working
    /// directory when no config directory is known.
    pub fn default_location() -> Self {
        Self::new(app_dir().join(SETTINGS_FILE))
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load settings, falling back to defaults on any failure.
    pub fn load(&self) -> WidgetSettings {
        match self.try_load() {
            Ok(Some(settings)) => {
                info!("Settings loaded from {}", self.path.display());
                settings
            }
            Ok(None) => {
                info!("Settings file not found, using defaults");
                WidgetSettings::default()
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                WidgetSettings::default()
            }
        }
    }

    /// Load settings. `Ok(None)` if the file does not exist.
    pub fn try_load(&self) -> Result<Option<WidgetSettings>, SettingsError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let load_failed = |source: Box<dyn std::error::Error + Send + Sync>| {
            SettingsError::LoadFailed {
                path: self.path.clone(),
                source,
            }
        };

        let json = std::fs::read_to_string(&self.path).map_err(|e| load_failed(e.into()))?;
        let settings = serde_json::from_str(&json).map_err(|e| load_failed(e.into()))?;
        Ok(Some(settings))
    }

    /// Save settings with an atomic write (temporary file, then rename).
    pub fn save(&self, settings: &WidgetSettings) -> Result<(), SettingsError> {
        let save_failed = |source: Box<dyn std::error::Error + Send + Sync>| {
            SettingsError::SaveFailed {
                path: self.path.clone(),
                source,
            }
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| save_failed(e.into()))?;
        }

        let json = serde_json::to_string_pretty(settings).map_err(|e| save_failed(e.into()))?;
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, json).map_err(|e| save_failed(e.into()))?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| save_failed(e.into()))?;

        debug!("Settings saved to {}", self.path.display());
        Ok(())
    }
}

/// Per-user application directory (`%APPDATA%\AudioWidget`).
pub fn app_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
