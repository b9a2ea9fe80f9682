//! Audio module for Windows Core Audio API interactions.
//!
//! This module provides volume and mute control of the default speaker
//! and microphone endpoints behind the [`AudioEndpoints`] capability.

pub mod device;
pub mod endpoint;
#[cfg(windows)]
pub mod enumerator;
#[cfg(test)]
pub mod mock;
#[cfg(windows)]
pub mod volume;

pub use device::{percent_to_scalar, scalar_to_percent, AudioError, DeviceVolumeState, Endpoint};
pub use endpoint::{AudioEndpoints, EndpointVolume, LazyEndpoints};
#[cfg(windows)]
pub use enumerator::{ComGuard, DeviceEnumerator, SystemAudio};
#[cfg(windows)]
pub use volume::VolumeController;
