//! Floating widget window implementation using eframe/egui.
//!
//! Frameless, always-on-top window with a slider and mute icon per
//! endpoint and an options menu.

use crate::app::{AppState, WidgetAction};
use crate::audio::{Endpoint, SystemAudio};
use crate::platform::RunKeyRegistry;
use crate::ui::customize;
use crate::ui::theme::{Rgba, WidgetTheme};
use crate::ui::tray::{TrayManager, TrayState};
use eframe::egui;
use std::time::Instant;
use tracing::{debug, warn};

/// Window size in points.
pub const WINDOW_SIZE: [f32; 2] = [480.0, 280.0];

const ICON_BOX: f32 = 96.0;
const GLYPH_SIZE: f32 = 48.0;
const SLIDER_LENGTH: f32 = 200.0;
const PANEL_MARGIN: f32 = 20.0;
const CONTROL_SPACING: f32 = 30.0;

/// Application state bound to the Windows audio and registry backends.
pub type WindowsAppState = AppState<SystemAudio, RunKeyRegistry>;

/// The eframe application.
pub struct AudioWidget {
    state: WindowsAppState,
    tray: TrayManager,
    /// Pending actions from the UI
    actions: Vec<WidgetAction>,
}

impl AudioWidget {
    /// Create the widget and its tray icon. Must run inside the event loop.
    pub fn new(state: WindowsAppState) -> Self {
        let mut tray = TrayManager::new();
        let tray_state = TrayState {
            tooltip: state.tooltip(),
            muted: state.speaker_muted(),
            autostart: state.settings.autostart,
        };
        if let Err(e) = tray.create(tray_state) {
            warn!("Tray icon unavailable: {}", e);
        }

        Self {
            state,
            tray,
            actions: Vec::new(),
        }
    }

    /// Window options: frameless, transparent, always on top, at `position`.
    pub fn native_options(position: Option<[i32; 2]>) -> eframe::NativeOptions {
        let mut viewport = egui::ViewportBuilder::default()
            .with_title("Audio Widget")
            .with_inner_size(WINDOW_SIZE)
            .with_decorations(false)
            .with_transparent(true)
            .with_resizable(false)
            .with_window_level(egui::WindowLevel::AlwaysOnTop);

        if let Some([x, y]) = position {
            viewport = viewport.with_position([x as f32, y as f32]);
        }

        eframe::NativeOptions {
            viewport,
            ..Default::default()
        }
    }

    fn track_window(&mut self, ctx: &egui::Context) {
        let (outer_rect, close_requested) =
            ctx.input(|i| (i.viewport().outer_rect, i.viewport().close_requested()));
        let position =
            outer_rect.map(|rect| [rect.min.x.round() as i32, rect.min.y.round() as i32]);

        self.state.on_window_state(position, close_requested);
    }

    fn show_widget(&mut self, ctx: &egui::Context) {
        let theme = self.state.theme;

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(color(theme.background))
                    .rounding(WidgetTheme::ROUNDING),
            )
            .show(ctx, |ui| {
                // Dragging the background moves the window
                let background =
                    ui.interact(ui.max_rect(), ui.id().with("drag"), egui::Sense::drag());
                if background.drag_started_by(egui::PointerButton::Primary) {
                    ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
                }

                egui::Frame::none()
                    .fill(color(theme.panel))
                    .rounding(WidgetTheme::ROUNDING)
                    .inner_margin(PANEL_MARGIN)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.spacing_mut().item_spacing.x = CONTROL_SPACING;
                            for endpoint in Endpoint::ALL {
                                self.endpoint_controls(ui, endpoint, &theme);
                            }
                            self.options_menu(ui, &theme);
                        });
                    });
            });
    }

    fn endpoint_controls(&mut self, ui: &mut egui::Ui, endpoint: Endpoint, theme: &WidgetTheme) {
        let controls = self.state.controls.controls(endpoint);
        let glyph = controls.icon.glyph();
        let mut value = controls.slider.value();

        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(ICON_BOX, ICON_BOX), egui::Sense::click());
        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                glyph.text,
                egui::FontId::proportional(GLYPH_SIZE),
                color(theme.text),
            );
            if glyph.strike_through {
                let inner = rect.shrink(ICON_BOX / 6.0);
                let stroke = egui::Stroke::new(3.0, color(theme.strike));
                painter.line_segment([inner.left_top(), inner.right_bottom()], stroke);
                painter.line_segment([inner.right_top(), inner.left_bottom()], stroke);
            }
        }
        if response.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
            self.actions.push(WidgetAction::ToggleMute(endpoint));
        }

        ui.scope(|ui| {
            ui.spacing_mut().slider_width = SLIDER_LENGTH;
            ui.visuals_mut().widgets.inactive.bg_fill = color(theme.groove);
            ui.visuals_mut().selection.bg_fill = color(theme.handle);

            let slider = egui::Slider::new(&mut value, 0..=100)
                .vertical()
                .show_value(false)
                .trailing_fill(true);
            if ui.add(slider).changed() {
                self.actions.push(WidgetAction::SliderMoved(endpoint, value));
            }
        });
    }

    fn options_menu(&mut self, ui: &mut egui::Ui, theme: &WidgetTheme) {
        let label = egui::RichText::new("⋮").size(18.0).color(color(theme.text));

        ui.menu_button(label, |ui| {
            if ui.button("Customize").clicked() {
                self.actions.push(WidgetAction::OpenCustomize);
                ui.close_menu();
            }

            let mut autostart = self.state.settings.autostart;
            if ui.checkbox(&mut autostart, "Autostart").clicked() {
                self.actions.push(WidgetAction::SetAutostart(autostart));
                ui.close_menu();
            }

            if ui.button("Quit").clicked() {
                self.actions.push(WidgetAction::Quit);
                ui.close_menu();
            }
        });
    }

    fn refresh_tray(&mut self) {
        if let Err(e) = self.tray.set_muted(self.state.speaker_muted()) {
            debug!("Tray icon not updated: {}", e);
        }
        if let Err(e) = self.tray.set_tooltip(&self.state.tooltip()) {
            debug!("Tray tooltip not updated: {}", e);
        }
        self.tray.set_autostart_checked(self.state.settings.autostart);
    }
}

impl eframe::App for AudioWidget {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0; 4]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.tick(Instant::now());
        self.actions.extend(self.tray.process_events());

        self.track_window(ctx);
        self.show_widget(ctx);
        if self.state.customize_open {
            customize::show(ctx, &self.state.settings, &mut self.actions);
        }

        for action in std::mem::take(&mut self.actions) {
            self.state.handle_action(action);
        }
        self.refresh_tray();

        if self.state.should_exit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        // Keeps the poll running while the window is idle
        ctx.request_repaint_after(self.state.poll_interval());
    }
}

pub(crate) fn color([r, g, b, a]: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}
