//! Toolkit-independent state of the widget controls.
//!
//! The eframe widget renders from these types; the sync loop and the
//! action handlers mutate them.

use crate::audio::{DeviceVolumeState, Endpoint};

/// Model of a vertical 0-100 slider.
///
/// `set_value` reports a user change notification unless notifications are
/// blocked, which is how programmatic updates from the poll loop avoid being
/// written back to the OS.
#[derive(Debug, Clone, Default)]
pub struct LevelSlider {
    value: u8,
    signals_blocked: bool,
}

impl LevelSlider {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Self {
        Self {
            value: value.min(Self::MAX),
            signals_blocked: false,
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Set the value. Returns the change notification, if one fires.
    pub fn set_value(&mut self, value: u8) -> Option<u8> {
        let value = value.min(Self::MAX);
        if value == self.value {
            return None;
        }
        self.value = value;
        if self.signals_blocked {
            None
        } else {
            Some(value)
        }
    }

    /// Set the value with change notifications blocked.
    pub fn set_value_quietly(&mut self, value: u8) {
        let previous = std::mem::replace(&mut self.signals_blocked, true);
        let _ = self.set_value(value);
        self.signals_blocked = previous;
    }
}

/// What to draw for a mute icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconGlyph {
    pub text: &'static str,
    /// Diagonal red strike drawn over the glyph
    pub strike_through: bool,
}

pub const SPEAKER_ON: &str = "🔊";
pub const SPEAKER_MUTED: &str = "🔇";
pub const MICROPHONE: &str = "🎤";

/// Clickable mute icon of one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MuteIcon {
    endpoint: Endpoint,
    muted: bool,
}

impl MuteIcon {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            muted: false,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Flip the mute flag and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// The speaker swaps between two glyphs, the microphone keeps its glyph
    /// and gets a strike-through overlay.
    pub fn glyph(&self) -> IconGlyph {
        match self.endpoint {
            Endpoint::Speaker => IconGlyph {
                text: if self.muted { SPEAKER_MUTED } else { SPEAKER_ON },
                strike_through: false,
            },
            Endpoint::Microphone => IconGlyph {
                text: MICROPHONE,
                strike_through: self.muted,
            },
        }
    }
}

/// Slider and icon pair for one endpoint.
#[derive(Debug, Clone)]
pub struct EndpointControls {
    pub slider: LevelSlider,
    pub icon: MuteIcon,
}

impl EndpointControls {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            slider: LevelSlider::default(),
            icon: MuteIcon::new(endpoint),
        }
    }

    /// State currently shown by the controls.
    pub fn displayed(&self) -> DeviceVolumeState {
        DeviceVolumeState {
            level_percent: self.slider.value(),
            is_muted: self.icon.is_muted(),
        }
    }
}

/// UI-held state for both endpoints.
#[derive(Debug, Clone)]
pub struct UiVolumeState {
    speaker: EndpointControls,
    microphone: EndpointControls,
}

impl UiVolumeState {
    pub fn new() -> Self {
        Self {
            speaker: EndpointControls::new(Endpoint::Speaker),
            microphone: EndpointControls::new(Endpoint::Microphone),
        }
    }

    pub fn controls(&self, endpoint: Endpoint) -> &EndpointControls {
        match endpoint {
            Endpoint::Speaker => &self.speaker,
            Endpoint::Microphone => &self.microphone,
        }
    }

    pub fn controls_mut(&mut self, endpoint: Endpoint) -> &mut EndpointControls {
        match endpoint {
            Endpoint::Speaker => &mut self.speaker,
            Endpoint::Microphone => &mut self.microphone,
        }
    }
}

impl Default for UiVolumeState {
    fn default() -> Self {
        Self::new()
    }
}
