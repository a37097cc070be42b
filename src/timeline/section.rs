use tracing::{debug, info};

use crate::foundation::core::Progress;
use crate::foundation::error::EmberResult;
use crate::progress::mask::{MaskGate, RevealMask, ThresholdTable};
use crate::timeline::latch::{EventLatches, LatchedEvent};
use crate::timeline::phase::{PhaseChange, PhaseGate, PhaseTable};
use crate::timeline::slide::SlideTrack;
use crate::timeline::style::{LayerStyle, StyleSheet, StyleTrack};

/// Declarative description of one scroll-bound section's timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineSpec {
    pub phases: PhaseTable,
    /// One threshold per revealable entity.
    #[serde(default)]
    pub reveals: ThresholdTable,
    #[serde(default)]
    pub styles: Vec<StyleTrack>,
    #[serde(default)]
    pub slide: SlideTrack,
    #[serde(default)]
    pub events: Vec<LatchedEvent>,
}

impl TimelineSpec {
    pub fn validate(&self) -> EmberResult<()> {
        for t in &self.styles {
            t.validate()?;
        }
        for e in &self.events {
            e.validate()?;
        }
        Ok(())
    }
}

/// Everything one progress sample produces.
///
/// Discrete fields (`phase_change`, `mask_change`, `events`) are `Some`/non-empty only on the
/// sample that crossed a threshold. Continuous fields are recomputed every sample.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineFrame {
    pub progress: Progress,
    pub measured: bool,
    pub phase: usize,
    pub phase_change: Option<PhaseChange>,
    pub mask: RevealMask,
    pub mask_change: bool,
    pub events: Vec<String>,
    pub styles: Vec<LayerStyle>,
    pub slide_offset: f64,
}

/// Live timeline state of a section: committed phase, committed reveal mask and event latches.
#[derive(Clone, Debug)]
pub struct ScrollSection {
    phases: PhaseTable,
    reveals: ThresholdTable,
    sheet: StyleSheet,
    slide: SlideTrack,
    phase_gate: PhaseGate,
    mask_gate: MaskGate,
    latches: EventLatches,
    active: bool,
}

impl ScrollSection {
    pub fn new(spec: &TimelineSpec) -> EmberResult<Self> {
        spec.validate()?;
        Ok(Self {
            phases: spec.phases.clone(),
            reveals: spec.reveals.clone(),
            sheet: StyleSheet::new(&spec.styles)?,
            slide: spec.slide.clone(),
            phase_gate: PhaseGate::new(0),
            mask_gate: MaskGate::new(spec.reveals.len()),
            latches: EventLatches::new(&spec.events)?,
            active: false,
        })
    }

    pub fn phases(&self) -> &PhaseTable {
        &self.phases
    }

    pub fn phase(&self) -> usize {
        self.phase_gate.committed()
    }

    pub fn mask(&self) -> &RevealMask {
        self.mask_gate.committed()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enter the section. Re-activation re-arms every one-shot event.
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        self.latches.reset();
        info!(phases = self.phases.len(), "section activated");
    }

    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        info!(phase = self.phase(), "section deactivated");
    }

    /// Drop every commit and re-arm the latches, as if freshly built. The next measured sample
    /// reports the current phase and mask as changes.
    pub fn reset(&mut self) {
        self.phase_gate = PhaseGate::new(0);
        self.mask_gate.reset();
        self.latches.reset();
    }

    /// Force the committed phase, bypassing progress. Used for explicit user selection.
    pub fn force_phase(&mut self, phase: usize) -> Option<PhaseChange> {
        let phase = phase.min(self.phases.len().saturating_sub(1));
        self.phase_gate.commit(phase)
    }

    /// Sample the timeline.
    ///
    /// `None` means the section is not measurable yet: continuous values are evaluated at 0 and
    /// nothing is committed or fired.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn sample(&mut self, progress: Option<Progress>) -> TimelineFrame {
        let measured = progress.is_some();
        let p = progress.unwrap_or(Progress::START);

        let mut phase_change = None;
        let mut mask_change = false;
        let mut events = Vec::new();

        // Discrete commits resolve before continuous values are derived.
        if measured {
            phase_change = self.phase_gate.commit(self.phases.phase_at(p));
            mask_change = self.mask_gate.commit(self.reveals.mask(p)).is_some();
            if self.active {
                events = self.latches.poll(p);
            }
        } else {
            debug!("section not measurable; sampling at rest");
        }

        TimelineFrame {
            progress: p,
            measured,
            phase: self.phase_gate.committed(),
            phase_change,
            mask: self.mask_gate.committed().clone(),
            mask_change,
            events,
            styles: self.sheet.evaluate(p),
            slide_offset: self.slide.sample(p),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/section.rs"]
mod tests;
