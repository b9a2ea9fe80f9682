//! Capability interface over the OS audio endpoint API.
//!
//! The sync loop only talks to these traits; the Windows binding lives in
//! [`super::enumerator`] and [`super::volume`].

use super::device::{AudioError, DeviceVolumeState, Endpoint};
use std::cell::RefCell;

/// Volume and mute control for one endpoint.
pub trait EndpointVolume {
    /// Get the current volume level (0.0 to 1.0).
    fn level(&self) -> Result<f32, AudioError>;

    /// Set the volume level (0.0 to 1.0).
    fn set_level(&self, level: f32) -> Result<(), AudioError>;

    /// Get the current mute state.
    fn is_muted(&self) -> Result<bool, AudioError>;

    /// Set the mute state.
    fn set_muted(&self, muted: bool) -> Result<(), AudioError>;

    /// Read level and mute flag together.
    fn state(&self) -> Result<DeviceVolumeState, AudioError> {
        let level = self.level()?;
        let muted = self.is_muted()?;
        Ok(DeviceVolumeState::from_scalar(level, muted))
    }
}

/// Source of endpoint handles (default output and default input device).
pub trait AudioEndpoints {
    type Volume: EndpointVolume;

    /// Acquire the volume control of the current default device for `endpoint`.
    fn endpoint(&self, endpoint: Endpoint) -> Result<Self::Volume, AudioError>;
}

/// Endpoint source that is created on first use.
///
/// A failed creation is reported as the requested endpoint being unavailable
/// and retried on the next call, so the widget comes up even when the audio
/// stack does not.
pub struct LazyEndpoints<S, F> {
    create: F,
    source: RefCell<Option<S>>,
}

impl<S, F> LazyEndpoints<S, F>
where
    S: AudioEndpoints,
    F: Fn() -> Result<S, AudioError>,
{
    pub fn new(create: F) -> Self {
        Self {
            create,
            source: RefCell::new(None),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.source.borrow().is_some()
    }
}

impl<S, F> AudioEndpoints for LazyEndpoints<S, F>
where
    S: AudioEndpoints,
    F: Fn() -> Result<S, AudioError>,
{
    type Volume = S::Volume;

    fn endpoint(&self, endpoint: Endpoint) -> Result<S::Volume, AudioError> {
        let mut source = self.source.borrow_mut();
        if source.is_none() {
            let created = (self.create)().map_err(|e| AudioError::EndpointUnavailable {
                endpoint,
                reason: e.to_string(),
            })?;
            *source = Some(created);
        }

        match source.as_ref() {
            Some(source) => source.endpoint(endpoint),
            None => Err(AudioError::EndpointUnavailable {
                endpoint,
                reason: "audio backend not created".to_string(),
            }),
        }
    }
}
