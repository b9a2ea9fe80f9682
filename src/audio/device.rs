//! Audio endpoint data models.
//!
//! Defines the two logical endpoints the widget controls, their observed
//! state, and the audio error type.

use std::fmt;
use thiserror::Error;

/// A logical audio endpoint (default device for a data-flow direction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Default render device (master volume)
    Speaker,

    /// Default capture device
    Microphone,
}

impl Endpoint {
    /// Both endpoints, in the order the widget lays them out and polls them.
    pub const ALL: [Endpoint; 2] = [Endpoint::Speaker, Endpoint::Microphone];
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Speaker => f.write_str("speaker"),
            Endpoint::Microphone => f.write_str("microphone"),
        }
    }
}

/// Volume and mute state of an endpoint as last read from the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceVolumeState {
    /// Volume as percentage (0-100)
    pub level_percent: u8,

    /// Current mute state
    pub is_muted: bool,
}

impl DeviceVolumeState {
    /// Build a state from a raw scalar level as reported by the OS.
    pub fn from_scalar(level: f32, is_muted: bool) -> Self {
        Self {
            level_percent: scalar_to_percent(level),
            is_muted,
        }
    }
}

/// Convert a 0.0-1.0 scalar to a 0-100 percent, rounding to nearest.
pub fn scalar_to_percent(level: f32) -> u8 {
    if level.is_nan() {
        return 0;
    }
    (level.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Convert a 0-100 percent to the scalar written to the OS.
pub fn percent_to_scalar(percent: u8) -> f32 {
    f32::from(percent.min(100)) / 100.0
}

/// Audio service error types.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("COM initialization failed: {0}")]
    ComInitFailed(String),

    #[error("Failed to create device enumerator: {0}")]
    EnumerationFailed(String),

    #[error("{endpoint} endpoint unavailable: {reason}")]
    EndpointUnavailable { endpoint: Endpoint, reason: String },

    #[error("Failed to write {endpoint} endpoint: {reason}")]
    EndpointWriteFailed { endpoint: Endpoint, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_conversion_round_trips() {
        for p in 0..=100u8 {
            assert_eq!(scalar_to_percent(percent_to_scalar(p)), p);
        }
    }

    #[test]
    fn test_scalar_out_of_range_is_clamped() {
        assert_eq!(scalar_to_percent(-0.5), 0);
        assert_eq!(scalar_to_percent(1.7), 100);
        assert_eq!(scalar_to_percent(f32::NAN), 0);
        assert_eq!(percent_to_scalar(250), 1.0);
    }

    #[test]
    fn test_scalar_rounds_to_nearest() {
        assert_eq!(scalar_to_percent(0.564), 56);
        assert_eq!(scalar_to_percent(0.566), 57);
    }

    #[test]
    fn test_error_message_names_endpoint() {
        let err = AudioError::EndpointUnavailable {
            endpoint: Endpoint::Microphone,
            reason: "gone".to_string(),
        };
        assert_eq!(err.to_string(), "microphone endpoint unavailable: gone");
    }
}
