//! Bidirectional synchronization between OS endpoint state and the widget.
//!
//! Everything here runs on the UI thread: `tick` is called from the frame
//! callback, the `on_user_*` handlers from widget actions.

use crate::audio::{
    percent_to_scalar, AudioEndpoints, AudioError, DeviceVolumeState, Endpoint, EndpointVolume,
};
use crate::ui::UiVolumeState;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Poll cadence.
pub const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Keeps the speaker and microphone controls in step with the OS.
pub struct VolumeSyncLoop<A: AudioEndpoints> {
    audio: A,
    interval: Duration,
    last_poll: Option<Instant>,
}

impl<A: AudioEndpoints> VolumeSyncLoop<A> {
    pub fn new(audio: A) -> Self {
        Self::with_interval(audio, POLL_INTERVAL)
    }

    pub fn with_interval(audio: A, interval: Duration) -> Self {
        Self {
            audio,
            interval,
            last_poll: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll if at least one interval has passed since the previous poll.
    /// Returns whether a poll ran.
    pub fn tick(&mut self, ui: &mut UiVolumeState, now: Instant) -> bool {
        let due = self
            .last_poll
            .map_or(true, |last| now.saturating_duration_since(last) >= self.interval);
        if due {
            self.last_poll = Some(now);
            self.poll(ui);
        }
        due
    }

    /// Read both endpoints and reconcile the controls. A failed read leaves
    /// that endpoint's controls untouched and does not affect the other.
    pub fn poll(&self, ui: &mut UiVolumeState) {
        for endpoint in Endpoint::ALL {
            match self.read(endpoint) {
                Ok(state) => apply_os_state(ui, endpoint, state),
                Err(e) => debug!("Skipping {} refresh: {}", endpoint, e),
            }
        }
    }

    /// Read the current OS state of an endpoint.
    pub fn read(&self, endpoint: Endpoint) -> Result<DeviceVolumeState, AudioError> {
        self.audio.endpoint(endpoint)?.state()
    }

    /// Push a user-chosen level to the OS. The slider keeps the requested
    /// value on failure; the next poll shows the real level.
    pub fn on_user_set_level(&self, endpoint: Endpoint, percent: u8) {
        let result = self
            .audio
            .endpoint(endpoint)
            .and_then(|volume| volume.set_level(percent_to_scalar(percent)));

        match result {
            Ok(()) => debug!("Set {} level to {}%", endpoint, percent),
            Err(e) => warn!("Failed to set {} level: {}", endpoint, e),
        }
    }

    /// Flip the mute flag, update the icon right away and write it to the OS.
    /// Returns the new flag.
    pub fn on_user_toggle_mute(&self, ui: &mut UiVolumeState, endpoint: Endpoint) -> bool {
        let muted = ui.controls_mut(endpoint).icon.toggle();

        let result = self
            .audio
            .endpoint(endpoint)
            .and_then(|volume| volume.set_muted(muted));

        match result {
            Ok(()) => debug!("Set {} mute to {}", endpoint, muted),
            Err(e) => warn!("Failed to set {} mute: {}", endpoint, e),
        }

        muted
    }
}

fn apply_os_state(ui: &mut UiVolumeState, endpoint: Endpoint, state: DeviceVolumeState) {
    let controls = ui.controls_mut(endpoint);
    if controls.slider.value() != state.level_percent {
        controls.slider.set_value_quietly(state.level_percent);
    }
    controls.icon.set_muted(state.is_muted);
}
