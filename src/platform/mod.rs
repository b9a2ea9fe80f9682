//! Platform-specific module for Windows utilities.
//!
//! This module contains settings persistence, autostart registration
//! and icon generation.

pub mod autostart;
pub mod icons;
pub mod settings;

#[cfg(windows)]
pub use autostart::RunKeyRegistry;
pub use autostart::{apply_autostart, AutostartError, AutostartRegistry};
pub use settings::{SettingsError, SettingsStore, WidgetSettings};
