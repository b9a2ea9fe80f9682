//! Application state and lifecycle management.
//!
//! Contains the main AppState struct and the handling of widget actions,
//! independent of the UI toolkit.

use crate::audio::{AudioEndpoints, Endpoint};
use crate::platform::autostart::current_exe_path;
use crate::platform::{apply_autostart, AutostartRegistry, SettingsStore, WidgetSettings};
use crate::sync::VolumeSyncLoop;
use crate::ui::theme::{format_hex_color, WidgetTheme};
use crate::ui::UiVolumeState;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Actions that can be triggered from the widget, its menus or the tray.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetAction {
    /// User dragged a slider to a new value
    SliderMoved(Endpoint, u8),
    /// User clicked a mute icon
    ToggleMute(Endpoint),
    /// Show the customization dialog
    OpenCustomize,
    /// Customization dialog was closed
    CloseCustomize,
    /// Autostart menu item toggled
    SetAutostart(bool),
    SetBackgroundColor([u8; 3]),
    SetBackgroundOpacity(f32),
    SetButtonsColor([u8; 3]),
    SetButtonsOpacity(f32),
    /// Window moved (outer position in screen pixels)
    WindowMoved([i32; 2]),
    /// Quit menu item
    Quit,
}

/// Main application state.
pub struct AppState<A: AudioEndpoints, R: AutostartRegistry> {
    /// Persisted preferences
    pub settings: WidgetSettings,

    /// Colors derived from the settings
    pub theme: WidgetTheme,

    /// Slider and icon state of both endpoints
    pub controls: UiVolumeState,

    /// Whether the customization dialog is visible
    pub customize_open: bool,

    /// Whether the application should exit
    pub should_exit: bool,

    sync: VolumeSyncLoop<A>,
    store: SettingsStore,
    autostart: R,
    position: Option<[i32; 2]>,
}

impl<A: AudioEndpoints, R: AutostartRegistry> AppState<A, R> {
    /// Load settings, align the autostart registration with them and read
    /// the initial endpoint state.
    pub fn new(audio: A, store: SettingsStore, autostart: R) -> Self {
        let settings = store.load();
        apply_autostart(&autostart, settings.autostart, current_exe_path());

        let mut state = Self {
            theme: WidgetTheme::from_settings(&settings),
            position: settings.position,
            settings,
            controls: UiVolumeState::new(),
            customize_open: false,
            should_exit: false,
            sync: VolumeSyncLoop::new(audio),
            store,
            autostart,
        };
        state.sync.poll(&mut state.controls);
        state
    }

    /// Position the window should open at.
    pub fn initial_position(&self) -> Option<[i32; 2]> {
        self.settings.position
    }

    pub fn poll_interval(&self) -> Duration {
        self.sync.interval()
    }

    /// Run the periodic poll if due.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.sync.tick(&mut self.controls, now)
    }

    /// Whether the speaker is muted, as currently displayed.
    pub fn speaker_muted(&self) -> bool {
        self.controls.controls(Endpoint::Speaker).icon.is_muted()
    }

    /// Get the tooltip text for the tray icon.
    pub fn tooltip(&self) -> String {
        let describe = |endpoint: Endpoint, label: &str| {
            let shown = self.controls.controls(endpoint).displayed();
            if shown.is_muted {
                format!("{} {}% (Muted)", label, shown.level_percent)
            } else {
                format!("{} {}%", label, shown.level_percent)
            }
        };
        format!(
            "{}\n{}",
            describe(Endpoint::Speaker, "Speaker"),
            describe(Endpoint::Microphone, "Microphone")
        )
    }

    /// Handle an action from the UI.
    pub fn handle_action(&mut self, action: WidgetAction) {
        match action {
            WidgetAction::SliderMoved(endpoint, value) => {
                let changed = self.controls.controls_mut(endpoint).slider.set_value(value);
                if let Some(percent) = changed {
                    self.sync.on_user_set_level(endpoint, percent);
                }
            }
            WidgetAction::ToggleMute(endpoint) => {
                self.sync.on_user_toggle_mute(&mut self.controls, endpoint);
            }
            WidgetAction::OpenCustomize => self.customize_open = true,
            WidgetAction::CloseCustomize => self.customize_open = false,
            WidgetAction::SetAutostart(enabled) => {
                self.settings.autostart = enabled;
                self.save_settings();
                apply_autostart(&self.autostart, enabled, current_exe_path());
            }
            WidgetAction::SetBackgroundColor(rgb) => {
                self.settings.background_color = format_hex_color(rgb);
                self.restyle();
            }
            WidgetAction::SetBackgroundOpacity(opacity) => {
                self.settings.background_opacity = opacity.clamp(0.0, 1.0);
                self.restyle();
            }
            WidgetAction::SetButtonsColor(rgb) => {
                self.settings.buttons_color = format_hex_color(rgb);
                self.restyle();
            }
            WidgetAction::SetButtonsOpacity(opacity) => {
                self.settings.buttons_opacity =
                    opacity.clamp(WidgetSettings::MIN_BUTTONS_OPACITY, 1.0);
                self.restyle();
            }
            WidgetAction::WindowMoved(position) => self.position = Some(position),
            WidgetAction::Quit => {
                info!("Quit requested");
                self.on_close();
                self.should_exit = true;
            }
        }
    }

    /// Record the window position seen this frame and save on a close
    /// request. The position is applied before saving so a move in the
    /// closing frame is kept.
    pub fn on_window_state(&mut self, position: Option<[i32; 2]>, close_requested: bool) {
        if let Some(position) = position {
            if self.position != Some(position) {
                self.handle_action(WidgetAction::WindowMoved(position));
            }
        }

        // Quit already saved the settings before closing
        if close_requested && !self.should_exit {
            self.on_close();
        }
    }

    /// Persist the last known window position. Called when the window closes.
    pub fn on_close(&mut self) {
        if let Some(position) = self.position {
            self.settings.position = Some(position);
        }
        self.save_settings();
    }

    fn restyle(&mut self) {
        self.theme = WidgetTheme::from_settings(&self.settings);
        self.save_settings();
    }

    fn save_settings(&self) {
        if let Err(e) = self.store.save(&self.settings) {
            warn!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::mock::MockAudio;
    use crate::platform::autostart::{mock::MockRegistry, APP_NAME};
    use crate::platform::settings::SETTINGS_FILE;

    struct Fixture {
        _dir: tempfile::TempDir,
        store: SettingsStore,
        audio: MockAudio,
        registry: MockRegistry,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let store = SettingsStore::new(dir.path().join(SETTINGS_FILE));
            Self {
                _dir: dir,
                store,
                audio: MockAudio::with_levels(0.5, 0.3),
                registry: MockRegistry::default(),
            }
        }

        fn app(&self) -> AppState<MockAudio, MockRegistry> {
            AppState::new(self.audio.clone(), self.store.clone(), self.registry.clone())
        }
    }

    #[test]
    fn test_startup_reads_initial_levels_without_writing() {
        let fx = Fixture::new();
        let app = fx.app();

        assert_eq!(app.controls.controls(Endpoint::Speaker).slider.value(), 50);
        assert_eq!(app.controls.controls(Endpoint::Microphone).slider.value(), 30);
        for endpoint in Endpoint::ALL {
            assert_eq!(fx.audio.write_count(endpoint), 0);
        }
    }

    #[test]
    fn test_slider_moved_writes_once() {
        let fx = Fixture::new();
        let mut app = fx.app();

        app.handle_action(WidgetAction::SliderMoved(Endpoint::Speaker, 75));
        app.handle_action(WidgetAction::SliderMoved(Endpoint::Speaker, 75));

        assert_eq!(fx.audio.get(Endpoint::Speaker).level_writes, vec![0.75]);
    }

    #[test]
    fn test_toggle_mute_action() {
        let fx = Fixture::new();
        let mut app = fx.app();

        app.handle_action(WidgetAction::ToggleMute(Endpoint::Speaker));

        assert!(app.speaker_muted());
        assert!(fx.audio.get(Endpoint::Speaker).muted);
        assert!(app.tooltip().contains("Speaker 50% (Muted)"));
    }

    #[test]
    fn test_startup_aligns_autostart() {
        let fx = Fixture::new();
        fx.store
            .save(&WidgetSettings {
                autostart: true,
                ..Default::default()
            })
            .unwrap();

        let _app = fx.app();

        assert!(fx.registry.get(APP_NAME).is_some());
    }

    #[test]
    fn test_toggle_autostart_saves_and_registers() {
        let fx = Fixture::new();
        let mut app = fx.app();

        app.handle_action(WidgetAction::SetAutostart(true));
        assert!(fx.store.load().autostart);
        assert!(fx.registry.get(APP_NAME).is_some());

        app.handle_action(WidgetAction::SetAutostart(false));
        assert!(!fx.store.load().autostart);
        assert!(fx.registry.get(APP_NAME).is_none());
    }

    #[test]
    fn test_autostart_failure_still_saves_flag() {
        let fx = Fixture::new();
        fx.registry.set_failing(true);
        let mut app = fx.app();

        app.handle_action(WidgetAction::SetAutostart(true));

        assert!(app.settings.autostart);
        assert!(fx.store.load().autostart);
    }

    #[test]
    fn test_customization_restyles_and_saves() {
        let fx = Fixture::new();
        let mut app = fx.app();

        app.handle_action(WidgetAction::SetButtonsColor([0x10, 0x20, 0x30]));
        app.handle_action(WidgetAction::SetButtonsOpacity(0.05));
        app.handle_action(WidgetAction::SetBackgroundOpacity(0.0));

        assert_eq!(app.theme.panel, [0x10, 0x20, 0x30, 51]);
        assert_eq!(app.theme.background[3], 0);

        let saved = fx.store.load();
        assert_eq!(saved.buttons_color, "#102030");
        assert_eq!(saved.buttons_opacity, WidgetSettings::MIN_BUTTONS_OPACITY);
        assert_eq!(saved.background_opacity, 0.0);
    }

    #[test]
    fn test_position_saved_on_close_is_restored() {
        let fx = Fixture::new();
        let mut app = fx.app();
        assert_eq!(app.initial_position(), None);

        app.handle_action(WidgetAction::WindowMoved([640, 120]));
        app.handle_action(WidgetAction::WindowMoved([700, 180]));
        app.on_close();

        let relaunched = fx.app();
        assert_eq!(relaunched.initial_position(), Some([700, 180]));
    }

    #[test]
    fn test_quit_saves_position_and_exits() {
        let fx = Fixture::new();
        let mut app = fx.app();

        app.handle_action(WidgetAction::WindowMoved([5, 6]));
        app.handle_action(WidgetAction::Quit);

        assert!(app.should_exit);
        assert_eq!(fx.store.load().position, Some([5, 6]));
    }

    #[test]
    fn test_move_in_closing_frame_is_saved() {
        let fx = Fixture::new();
        let mut app = fx.app();
        app.on_window_state(Some([100, 100]), false);

        app.on_window_state(Some([320, 240]), true);

        assert_eq!(fx.store.load().position, Some([320, 240]));
    }

    #[test]
    fn test_close_after_quit_does_not_save_again() {
        let fx = Fixture::new();
        let mut app = fx.app();
        app.on_window_state(Some([5, 6]), false);
        app.handle_action(WidgetAction::Quit);
        std::fs::remove_file(fx.store.path()).unwrap();

        app.on_window_state(Some([5, 6]), true);

        assert!(!fx.store.path().exists());
    }

    #[test]
    fn test_customize_dialog_flag() {
        let fx = Fixture::new();
        let mut app = fx.app();

        app.handle_action(WidgetAction::OpenCustomize);
        assert!(app.customize_open);
        app.handle_action(WidgetAction::CloseCustomize);
        assert!(!app.customize_open);
    }
}
