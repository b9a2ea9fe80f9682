//! Widget colors derived from user settings.
//!
//! Colors are kept as unmultiplied RGBA so this module does not depend on
//! the UI toolkit.

use crate::platform::WidgetSettings;

/// Unmultiplied RGBA.
pub type Rgba = [u8; 4];

/// Colors used to draw the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetTheme {
    /// Area behind the control panel
    pub background: Rgba,

    /// Control panel fill
    pub panel: Rgba,

    /// Slider groove
    pub groove: Rgba,

    /// Slider handle
    pub handle: Rgba,

    /// Glyphs and menu text
    pub text: Rgba,

    /// Microphone strike-through overlay
    pub strike: Rgba,
}

impl WidgetTheme {
    pub const GROOVE: Rgba = [0x4A, 0x4A, 0x4A, 0xFF];
    pub const HANDLE: Rgba = [0x00, 0x7A, 0xFF, 0xFF];
    pub const TEXT: Rgba = [0xFF, 0xFF, 0xFF, 0xFF];
    pub const STRIKE: Rgba = [0xFF, 0x00, 0x00, 0xFF];

    /// Corner radius of the control panel.
    pub const ROUNDING: f32 = 10.0;

    pub fn from_settings(settings: &WidgetSettings) -> Self {
        Self {
            background: with_opacity(
                parse_or_default(&settings.background_color),
                settings.background_opacity,
            ),
            panel: with_opacity(
                parse_or_default(&settings.buttons_color),
                settings.buttons_opacity,
            ),
            groove: Self::GROOVE,
            handle: Self::HANDLE,
            text: Self::TEXT,
            strike: Self::STRIKE,
        }
    }
}

impl Default for WidgetTheme {
    fn default() -> Self {
        Self::from_settings(&WidgetSettings::default())
    }
}

/// Parse `#RRGGBB` or `#RGB` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize, len: usize| u8::from_str_radix(&hex[i..i + len], 16).ok();

    match hex.len() {
        6 => Some([channel(0, 2)?, channel(2, 2)?, channel(4, 2)?]),
        3 => {
            let [r, g, b] = [channel(0, 1)?, channel(1, 1)?, channel(2, 1)?];
            Some([r * 17, g * 17, b * 17])
        }
        _ => None,
    }
}

/// Format as `#rrggbb`, the form colors are saved in.
pub fn format_hex_color([r, g, b]: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Opacity 0.0-1.0 to an alpha byte, truncating.
pub fn opacity_to_alpha(opacity: f32) -> u8 {
    if opacity.is_nan() {
        return 0;
    }
    (opacity.clamp(0.0, 1.0) * 255.0) as u8
}

fn with_opacity([r, g, b]: [u8; 3], opacity: f32) -> Rgba {
    [r, g, b, opacity_to_alpha(opacity)]
}

fn parse_or_default(s: &str) -> [u8; 3] {
    parse_hex_color(s)
        .or_else(|| parse_hex_color(WidgetSettings::DEFAULT_COLOR))
        .unwrap_or([0x2E, 0x2E, 0x2E])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#2E2E2E"), Some([0x2E, 0x2E, 0x2E]));
        assert_eq!(parse_hex_color("007aff"), Some([0x00, 0x7A, 0xFF]));
        assert_eq!(parse_hex_color("#fff"), Some([0xFF, 0xFF, 0xFF]));
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_format_round_trip() {
        assert_eq!(format_hex_color([0x12, 0xAB, 0x00]), "#12ab00");
        assert_eq!(parse_hex_color(&format_hex_color([1, 2, 3])), Some([1, 2, 3]));
    }

    #[test]
    fn test_opacity_to_alpha() {
        assert_eq!(opacity_to_alpha(0.0), 0);
        assert_eq!(opacity_to_alpha(0.6), 153);
        assert_eq!(opacity_to_alpha(1.0), 255);
        assert_eq!(opacity_to_alpha(3.0), 255);
    }

    #[test]
    fn test_theme_from_default_settings() {
        let theme = WidgetTheme::default();
        assert_eq!(theme.background, [0x2E, 0x2E, 0x2E, 153]);
        assert_eq!(theme.panel, [0x2E, 0x2E, 0x2E, 229]);
        assert_eq!(theme.handle, WidgetTheme::HANDLE);
    }

    #[test]
    fn test_invalid_color_falls_back() {
        let settings = WidgetSettings {
            buttons_color: "not a color".to_string(),
            buttons_opacity: 1.0,
            ..Default::default()
        };
        assert_eq!(
            WidgetTheme::from_settings(&settings).panel,
            [0x2E, 0x2E, 0x2E, 255]
        );
    }
}
