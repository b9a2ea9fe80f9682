//! Default endpoint lookup using Windows MMDevice API.
//!
//! Provides COM initialization and access to the default render and
//! capture devices.

use super::device::{AudioError, Endpoint};
use super::endpoint::{AudioEndpoints, LazyEndpoints};
use super::volume::VolumeController;
use windows::Win32::Media::Audio::{
    eCapture, eConsole, eRender, EDataFlow, IMMDeviceEnumerator, MMDeviceEnumerator,
};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoUninitialize, CLSCTX_ALL, COINIT_APARTMENTTHREADED,
};

/// COM initialization guard that uninitializes COM on drop.
pub struct ComGuard {
    initialized: bool,
}

impl ComGuard {
    /// Initialize COM for the current thread.
    pub fn new() -> Result<Self, AudioError> {
        unsafe {
            // Use apartment-threaded for UI compatibility
            CoInitializeEx(None, COINIT_APARTMENTTHREADED)
                .ok()
                .map_err(|e| AudioError::ComInitFailed(e.message()))?;
        }
        Ok(Self { initialized: true })
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        if self.initialized {
            unsafe {
                CoUninitialize();
            }
        }
    }
}

/// Default endpoints of the system, with the enumerator created on first use.
pub type SystemAudio = LazyEndpoints<DeviceEnumerator, fn() -> Result<DeviceEnumerator, AudioError>>;

/// Device enumerator using Windows MMDevice API.
pub struct DeviceEnumerator {
    enumerator: IMMDeviceEnumerator,
}

impl DeviceEnumerator {
    /// Create a new DeviceEnumerator.
    ///
    /// Note: COM must be initialized before calling this function.
    pub fn new() -> Result<Self, AudioError> {
        unsafe {
            let enumerator: IMMDeviceEnumerator =
                CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL)
                    .map_err(|e| AudioError::EnumerationFailed(e.message()))?;

            Ok(Self { enumerator })
        }
    }

    /// Enumerator that is created when first needed and retried until it
    /// succeeds.
    pub fn lazy() -> SystemAudio {
        LazyEndpoints::new(DeviceEnumerator::new as fn() -> _)
    }

    fn data_flow(endpoint: Endpoint) -> EDataFlow {
        match endpoint {
            Endpoint::Speaker => eRender,
            Endpoint::Microphone => eCapture,
        }
    }
}

impl AudioEndpoints for DeviceEnumerator {
    type Volume = VolumeController;

    // Looked up on every call so a change of default device is followed.
    fn endpoint(&self, endpoint: Endpoint) -> Result<VolumeController, AudioError> {
        let device = unsafe {
            self.enumerator
                .GetDefaultAudioEndpoint(Self::data_flow(endpoint), eConsole)
                .map_err(|e| AudioError::EndpointUnavailable {
                    endpoint,
                    reason: e.message(),
                })?
        };

        VolumeController::new(endpoint, &device)
    }
}
