use tracing::debug;

use crate::foundation::core::Progress;
use crate::foundation::error::{EmberError, EmberResult};

/// Boolean latch that lets an action happen once per activation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OneShotLatch {
    fired: bool,
}

impl OneShotLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` exactly once until [`OneShotLatch::reset`].
    pub fn try_fire(&mut self) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn reset(&mut self) {
        self.fired = false;
    }
}

/// Named event dispatched the first time progress reaches `at`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LatchedEvent {
    pub name: String,
    pub at: f64,
}

impl LatchedEvent {
    pub fn validate(&self) -> EmberResult<()> {
        if self.name.trim().is_empty() {
            return Err(EmberError::validation("latched event name must be non-empty"));
        }
        if !self.at.is_finite() || !(0.0..=1.0).contains(&self.at) {
            return Err(EmberError::validation(format!(
                "latched event '{}' threshold must lie in [0, 1]",
                self.name
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct EventLatches {
    events: Vec<(LatchedEvent, OneShotLatch)>,
}

impl EventLatches {
    pub fn new(events: &[LatchedEvent]) -> EmberResult<Self> {
        for e in events {
            e.validate()?;
        }
        Ok(Self {
            events: events
                .iter()
                .cloned()
                .map(|e| (e, OneShotLatch::new()))
                .collect(),
        })
    }

    /// Names of events whose threshold is reached for the first time at `p`.
    pub fn poll(&mut self, p: Progress) -> Vec<String> {
        let mut out = Vec::new();
        for (event, latch) in &mut self.events {
            if p.get() >= event.at && latch.try_fire() {
                debug!(event = %event.name, at = event.at, progress = p.get(), "latched event fired");
                out.push(event.name.clone());
            }
        }
        out
    }

    pub fn reset(&mut self) {
        for (_, latch) in &mut self.events {
            latch.reset();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/latch.rs"]
mod tests;
