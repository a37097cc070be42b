use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::Window;
use crate::foundation::error::{EmberError, EmberResult};
use crate::media::sync::MediaWindow;
use crate::progress::mask::ThresholdTable;
use crate::reveal::choreography::{ChoreographySpec, EntryTrigger};
use crate::reveal::reconcile::ReconcilePolicy;
use crate::reveal::slots::Slot;
use crate::timeline::latch::LatchedEvent;
use crate::timeline::phase::PhaseTable;
use crate::timeline::section::TimelineSpec;
use crate::timeline::slide::SlideTrack;
use crate::timeline::style::StyleTrack;

/// JSON description of one scroll-bound section.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionSpec {
    pub name: String,
    pub phases: PhaseTable,
    /// Thresholds of standalone reveal entities. Left empty when a choreography supplies them.
    #[serde(default)]
    pub reveals: ThresholdTable,
    #[serde(default)]
    pub styles: Vec<StyleTrack>,
    #[serde(default)]
    pub slide: SlideTrack,
    #[serde(default)]
    pub events: Vec<LatchedEvent>,
    #[serde(default)]
    pub choreography: Option<ChoreographySpec>,
    #[serde(default)]
    pub reconcile: ReconcilePolicy,
    /// Let the phase timer advance phases without scroll input.
    #[serde(default)]
    pub autoplay: bool,
    #[serde(default)]
    pub media: Vec<MediaWindow>,
    /// Sub-range of section progress that drives the burn from 0 to 1.
    #[serde(default)]
    pub burn: Option<Window>,
    /// Sibling events that activate this section.
    #[serde(default)]
    pub listens: Vec<String>,
    #[serde(default)]
    pub haptics: bool,
    #[serde(default)]
    pub slots: Vec<Slot>,
    /// Number of images the slots rotate through.
    #[serde(default)]
    pub slot_pool: usize,
    #[serde(default)]
    pub seed: u64,
}

impl SectionSpec {
    /// Parse from a JSON reader. Does not validate.
    pub fn from_reader<R: std::io::Read>(r: R) -> EmberResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| EmberError::validation(format!("parse section JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> EmberResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            EmberError::validation(format!("open section JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> EmberResult<()> {
        if self.name.trim().is_empty() {
            return Err(EmberError::validation("section name must be non-empty"));
        }
        self.timeline()?.validate()?;

        if let Some(choreo) = &self.choreography {
            choreo.validate()?;
            if !self.reveals.is_empty() && choreo.trigger == EntryTrigger::Scroll {
                return Err(EmberError::validation(format!(
                    "section '{}' declares both reveals and a scroll choreography",
                    self.name
                )));
            }
            if choreo.batches.len() > self.phases.len() {
                return Err(EmberError::validation(format!(
                    "section '{}' has {} reveal batches but only {} phases",
                    self.name,
                    choreo.batches.len(),
                    self.phases.len()
                )));
            }
            if let Some(&w) = choreo.wipe_phases.iter().find(|&&w| w >= self.phases.len()) {
                return Err(EmberError::validation(format!(
                    "section '{}' wipe phase {w} does not exist",
                    self.name
                )));
            }
        }

        for m in &self.media {
            if m.name.trim().is_empty() {
                return Err(EmberError::validation("media window name must be non-empty"));
            }
            m.window()?;
        }
        if let Some(w) = &self.burn {
            w.validate()?;
            if w.start >= w.end {
                return Err(EmberError::validation("burn window must have start < end"));
            }
        }
        for slot in &self.slots {
            slot.validate()?;
        }
        if !self.slots.is_empty() && self.slot_pool == 0 {
            return Err(EmberError::validation(format!(
                "section '{}' has slots but an empty image pool",
                self.name
            )));
        }
        if self.listens.iter().any(|l| l.trim().is_empty()) {
            return Err(EmberError::validation("listened event names must be non-empty"));
        }
        Ok(())
    }

    /// The timeline part, with reveal thresholds taken from the choreography when present.
    pub fn timeline(&self) -> EmberResult<TimelineSpec> {
        let reveals = match &self.choreography {
            Some(c) if c.trigger == EntryTrigger::Scroll => c.thresholds()?,
            _ => self.reveals.clone(),
        };
        Ok(TimelineSpec {
            phases: self.phases.clone(),
            reveals,
            styles: self.styles.clone(),
            slide: self.slide.clone(),
            events: self.events.clone(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/spec.rs"]
mod tests;
