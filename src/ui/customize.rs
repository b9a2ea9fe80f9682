//! Customization dialog.
//!
//! A separate viewport with color pickers and opacity sliders. Each change is
//! emitted as a [`WidgetAction`] and saved immediately by the app state.

use crate::app::WidgetAction;
use crate::platform::WidgetSettings;
use crate::ui::theme::parse_hex_color;
use eframe::egui;
use std::ops::RangeInclusive;

const DIALOG_SIZE: [f32; 2] = [320.0, 180.0];

pub fn show(ctx: &egui::Context, settings: &WidgetSettings, actions: &mut Vec<WidgetAction>) {
    ctx.show_viewport_immediate(
        egui::ViewportId::from_hash_of("customize"),
        egui::ViewportBuilder::default()
            .with_title("Customization")
            .with_inner_size(DIALOG_SIZE)
            .with_resizable(false),
        |ctx, _class| {
            egui::CentralPanel::default().show(ctx, |ui| {
                egui::Grid::new("customize_grid")
                    .num_columns(2)
                    .spacing([16.0, 12.0])
                    .show(ui, |ui| {
                        color_row(
                            ui,
                            "Button color",
                            &settings.buttons_color,
                            WidgetAction::SetButtonsColor,
                            actions,
                        );
                        color_row(
                            ui,
                            "Background color",
                            &settings.background_color,
                            WidgetAction::SetBackgroundColor,
                            actions,
                        );
                        opacity_row(
                            ui,
                            "Button opacity:",
                            settings.buttons_opacity,
                            20..=100,
                            WidgetAction::SetButtonsOpacity,
                            actions,
                        );
                        opacity_row(
                            ui,
                            "Background opacity:",
                            settings.background_opacity,
                            0..=100,
                            WidgetAction::SetBackgroundOpacity,
                            actions,
                        );
                    });
            });

            if ctx.input(|i| i.viewport().close_requested()) {
                actions.push(WidgetAction::CloseCustomize);
            }
        },
    );
}

fn color_row(
    ui: &mut egui::Ui,
    label: &str,
    current: &str,
    action: fn([u8; 3]) -> WidgetAction,
    actions: &mut Vec<WidgetAction>,
) {
    ui.label(label);
    let mut rgb = parse_hex_color(current)
        .or_else(|| parse_hex_color(WidgetSettings::DEFAULT_COLOR))
        .unwrap_or_default();
    if ui.color_edit_button_srgb(&mut rgb).changed() {
        actions.push(action(rgb));
    }
    ui.end_row();
}

fn opacity_row(
    ui: &mut egui::Ui,
    label: &str,
    opacity: f32,
    range: RangeInclusive<u8>,
    action: fn(f32) -> WidgetAction,
    actions: &mut Vec<WidgetAction>,
) {
    ui.label(label);
    let mut percent = (opacity.clamp(0.0, 1.0) * 100.0).round() as u8;
    if ui
        .add(egui::Slider::new(&mut percent, range).suffix(" %"))
        .changed()
    {
        actions.push(action(f32::from(percent) / 100.0));
    }
    ui.end_row();
}
