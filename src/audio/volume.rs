//! Volume control using IAudioEndpointVolume.
//!
//! Provides volume and mute control for audio devices.

use super::device::{AudioError, Endpoint};
use super::endpoint::EndpointVolume;
use windows::Win32::Media::Audio::{Endpoints::IAudioEndpointVolume, IMMDevice};
use windows::Win32::System::Com::CLSCTX_ALL;

/// Volume controller for a specific device.
pub struct VolumeController {
    endpoint: Endpoint,
    endpoint_volume: IAudioEndpointVolume,
}

impl VolumeController {
    /// Create a new VolumeController for the given device.
    pub fn new(endpoint: Endpoint, device: &IMMDevice) -> Result<Self, AudioError> {
        unsafe {
            let endpoint_volume: IAudioEndpointVolume = device
                .Activate(CLSCTX_ALL, None)
                .map_err(|e| AudioError::EndpointUnavailable {
                    endpoint,
                    reason: e.message(),
                })?;

            Ok(Self {
                endpoint,
                endpoint_volume,
            })
        }
    }

    fn read_failed(&self, e: windows::core::Error) -> AudioError {
        AudioError::EndpointUnavailable {
            endpoint: self.endpoint,
            reason: e.message(),
        }
    }

    fn write_failed(&self, e: windows::core::Error) -> AudioError {
        AudioError::EndpointWriteFailed {
            endpoint: self.endpoint,
            reason: e.message(),
        }
    }
}

impl EndpointVolume for VolumeController {
    fn level(&self) -> Result<f32, AudioError> {
        unsafe {
            self.endpoint_volume
                .GetMasterVolumeLevelScalar()
                .map_err(|e| self.read_failed(e))
        }
    }

    fn set_level(&self, level: f32) -> Result<(), AudioError> {
        let level = level.clamp(0.0, 1.0);
        unsafe {
            self.endpoint_volume
                .SetMasterVolumeLevelScalar(level, std::ptr::null())
                .map_err(|e| self.write_failed(e))
        }
    }

    fn is_muted(&self) -> Result<bool, AudioError> {
        unsafe {
            let muted = self
                .endpoint_volume
                .GetMute()
                .map_err(|e| self.read_failed(e))?;
            Ok(muted.as_bool())
        }
    }

    fn set_muted(&self, muted: bool) -> Result<(), AudioError> {
        unsafe {
            self.endpoint_volume
                .SetMute(muted, std::ptr::null())
                .map_err(|e| self.write_failed(e))
        }
    }
}
