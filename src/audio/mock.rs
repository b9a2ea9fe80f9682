//! In-memory endpoints for tests.

use super::device::{AudioError, Endpoint};
use super::endpoint::{AudioEndpoints, EndpointVolume};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Simulated state of one endpoint.
#[derive(Debug, Clone, Default)]
pub struct MockEndpoint {
    pub level: f32,
    pub muted: bool,
    /// Endpoint cannot be acquired at all
    pub unavailable: bool,
    /// Reads fail after the endpoint is acquired
    pub fail_reads: bool,
    /// Writes fail and leave the state untouched
    pub fail_writes: bool,
    pub level_writes: Vec<f32>,
    pub mute_writes: Vec<bool>,
}

/// Shared handle to a set of simulated endpoints.
#[derive(Debug, Clone, Default)]
pub struct MockAudio {
    state: Rc<RefCell<HashMap<Endpoint, MockEndpoint>>>,
}

impl MockAudio {
    pub fn new() -> Self {
        let audio = Self::default();
        for endpoint in Endpoint::ALL {
            audio.state.borrow_mut().insert(endpoint, MockEndpoint::default());
        }
        audio
    }

    pub fn with_levels(speaker: f32, microphone: f32) -> Self {
        let audio = Self::new();
        audio.update(Endpoint::Speaker, |e| e.level = speaker);
        audio.update(Endpoint::Microphone, |e| e.level = microphone);
        audio
    }

    pub fn update(&self, endpoint: Endpoint, f: impl FnOnce(&mut MockEndpoint)) {
        let mut state = self.state.borrow_mut();
        f(state.entry(endpoint).or_default());
    }

    pub fn get(&self, endpoint: Endpoint) -> MockEndpoint {
        self.state
            .borrow()
            .get(&endpoint)
            .cloned()
            .unwrap_or_default()
    }

    /// Total number of writes of either kind.
    pub fn write_count(&self, endpoint: Endpoint) -> usize {
        let e = self.get(endpoint);
        e.level_writes.len() + e.mute_writes.len()
    }
}

impl AudioEndpoints for MockAudio {
    type Volume = MockVolume;

    fn endpoint(&self, endpoint: Endpoint) -> Result<MockVolume, AudioError> {
        if self.get(endpoint).unavailable {
            return Err(AudioError::EndpointUnavailable {
                endpoint,
                reason: "no default device".to_string(),
            });
        }
        Ok(MockVolume {
            endpoint,
            audio: self.clone(),
        })
    }
}

pub struct MockVolume {
    endpoint: Endpoint,
    audio: MockAudio,
}

impl MockVolume {
    fn read<T>(&self, f: impl FnOnce(&MockEndpoint) -> T) -> Result<T, AudioError> {
        let e = self.audio.get(self.endpoint);
        if e.fail_reads {
            return Err(AudioError::EndpointUnavailable {
                endpoint: self.endpoint,
                reason: "read failed".to_string(),
            });
        }
        Ok(f(&e))
    }

    fn write(&self, f: impl FnOnce(&mut MockEndpoint)) -> Result<(), AudioError> {
        let mut failed = false;
        self.audio.update(self.endpoint, |e| {
            if e.fail_writes {
                failed = true;
            } else {
                f(e);
            }
        });
        if failed {
            return Err(AudioError::EndpointWriteFailed {
                endpoint: self.endpoint,
                reason: "write failed".to_string(),
            });
        }
        Ok(())
    }
}

impl EndpointVolume for MockVolume {
    fn level(&self) -> Result<f32, AudioError> {
        self.read(|e| e.level)
    }

    fn set_level(&self, level: f32) -> Result<(), AudioError> {
        self.write(|e| {
            e.level = level;
            e.level_writes.push(level);
        })
    }

    fn is_muted(&self) -> Result<bool, AudioError> {
        self.read(|e| e.muted)
    }

    fn set_muted(&self, muted: bool) -> Result<(), AudioError> {
        self.write(|e| {
            e.muted = muted;
            e.mute_writes.push(muted);
        })
    }
}
