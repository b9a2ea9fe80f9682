//! Audio Widget - Library
//!
//! A floating, always-on-top widget for the default speaker and microphone
//! on Windows.
//!
//! ## Features
//!
//! - Vertical volume sliders for speaker and microphone
//! - Click-to-mute icons for each
//! - Two-way sync with the OS every 200 ms
//! - Customizable colors and opacities, remembered window position
//! - Start with Windows option

pub mod app;
pub mod audio;
pub mod logging;
pub mod platform;
pub mod sync;
pub mod ui;

pub use app::{AppState, WidgetAction};
pub use audio::{AudioEndpoints, AudioError, DeviceVolumeState, Endpoint, EndpointVolume};
pub use platform::{SettingsStore, WidgetSettings};
pub use sync::VolumeSyncLoop;
pub use ui::UiVolumeState;
