//! UI module for the floating widget and system tray.
//!
//! `state` and `theme` are toolkit-independent; the eframe window, the
//! customization dialog and the tray icon are Windows-only.

#[cfg(windows)]
pub mod customize;
pub mod state;
pub mod theme;
#[cfg(windows)]
pub mod tray;
#[cfg(windows)]
pub mod widget;

pub use state::{EndpointControls, IconGlyph, LevelSlider, MuteIcon, UiVolumeState};
pub use theme::WidgetTheme;
#[cfg(windows)]
pub use tray::{TrayError, TrayManager, TrayState};
#[cfg(windows)]
pub use widget::AudioWidget;
