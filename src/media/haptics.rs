//! Audible "haptic" ticks on phase changes.
//!
//! The audio backend is built lazily on the first tick. Hosts without audio hand in a factory
//! that returns `None`, and every later tick is a silent no-op.

use std::f64::consts::TAU;

use tracing::{debug, warn};

use crate::config::knobs::MediaTuning;
use crate::media::element::PlaybackError;

/// Sink for short mono buffers.
pub trait AudioBackend {
    fn sample_rate(&self) -> u32;

    fn play(&mut self, samples: &[f32]) -> Result<(), PlaybackError>;
}

pub type BackendFactory = Box<dyn FnOnce() -> Option<Box<dyn AudioBackend>>>;

/// Decaying sine click.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HapticTick {
    pub frequency: f64,
    pub duration: f64,
    pub gain: f64,
}

impl HapticTick {
    pub fn from_tuning(tuning: &MediaTuning) -> Self {
        Self {
            frequency: tuning.tick_frequency,
            duration: tuning.tick_duration,
            gain: tuning.tick_gain,
        }
    }

    pub fn render(&self, sample_rate: u32) -> Vec<f32> {
        let sr = f64::from(sample_rate.max(1));
        let n = (self.duration.max(0.0) * sr).round() as usize;
        let decay = (self.duration / 5.0).max(1e-6);
        (0..n)
            .map(|i| {
                let t = i as f64 / sr;
                (self.gain * (TAU * self.frequency * t).sin() * (-t / decay).exp()) as f32
            })
            .collect()
    }
}

enum Backend {
    Unbuilt(BackendFactory),
    Ready {
        backend: Box<dyn AudioBackend>,
        buffer: Vec<f32>,
    },
    Unavailable,
}

pub struct HapticService {
    backend: Backend,
    tick: HapticTick,
    enabled: bool,
    played: u64,
}

impl HapticService {
    pub fn new(tuning: &MediaTuning, factory: BackendFactory) -> Self {
        Self {
            backend: Backend::Unbuilt(factory),
            tick: HapticTick::from_tuning(tuning),
            enabled: tuning.haptics,
            played: 0,
        }
    }

    /// Service on a host without audio.
    pub fn unavailable() -> Self {
        Self {
            backend: Backend::Unavailable,
            tick: HapticTick::from_tuning(&MediaTuning::default()),
            enabled: false,
            played: 0,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, Backend::Unavailable)
    }

    /// Ticks actually handed to the backend.
    pub fn played(&self) -> u64 {
        self.played
    }

    /// Play one tick. Returns whether sound was produced; never fails.
    pub fn tick(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        if matches!(self.backend, Backend::Unbuilt(_)) {
            let state = std::mem::replace(&mut self.backend, Backend::Unavailable);
            if let Backend::Unbuilt(factory) = state {
                self.backend = match factory() {
                    Some(backend) => {
                        let buffer = self.tick.render(backend.sample_rate());
                        debug!(sample_rate = backend.sample_rate(), "haptic backend ready");
                        Backend::Ready { backend, buffer }
                    }
                    None => {
                        debug!("no audio backend; haptics disabled");
                        Backend::Unavailable
                    }
                };
            }
        }

        let Backend::Ready { backend, buffer } = &mut self.backend else {
            return false;
        };
        match backend.play(buffer) {
            Ok(()) => {
                self.played += 1;
                true
            }
            Err(err) => {
                warn!(error = %err, "haptic tick dropped");
                false
            }
        }
    }

    /// Release the backend; later ticks are no-ops.
    pub fn teardown(&mut self) {
        self.backend = Backend::Unavailable;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/haptics.rs"]
mod tests;
