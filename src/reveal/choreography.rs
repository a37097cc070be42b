//! Batch choreography.
//!
//! Batch `i` belongs to phase `i`. When phase `N` is committed, batch `N` starts entering its
//! members, batch `N - 1` dims to a backdrop and every older batch fades out. A backdrop batch
//! stays visible until the next phase change, so a sweep never shows an empty stage between
//! batches. Wipe phases are the exception: every earlier batch goes straight to `Gone`.

use tracing::debug;

use crate::config::knobs::RevealTuning;
use crate::foundation::error::{EmberError, EmberResult};
use crate::progress::mask::{RevealMask, ThresholdTable};
use crate::reveal::lifecycle::{Member, MemberVisual, RevealState};

/// What makes a member of the current batch enter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryTrigger {
    /// Member `i` enters when progress reaches its own threshold.
    #[default]
    Scroll,
    /// Members enter `stagger` seconds apart after the phase commits.
    Timed,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BatchSpec {
    /// Entry threshold per member. Only the count matters for timed entry.
    pub members: Vec<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChoreographySpec {
    pub batches: Vec<BatchSpec>,
    #[serde(default)]
    pub trigger: EntryTrigger,
    #[serde(default)]
    pub wipe_phases: Vec<usize>,
}

impl ChoreographySpec {
    pub fn validate(&self) -> EmberResult<()> {
        for (i, b) in self.batches.iter().enumerate() {
            if b.members.is_empty() {
                return Err(EmberError::validation(format!("reveal batch {i} has no members")));
            }
        }
        if self.trigger == EntryTrigger::Scroll {
            self.thresholds()?;
        }
        Ok(())
    }

    pub fn member_count(&self) -> usize {
        self.batches.iter().map(|b| b.members.len()).sum()
    }

    /// Flattened member thresholds, batch by batch. Empty for timed entry.
    pub fn thresholds(&self) -> EmberResult<ThresholdTable> {
        if self.trigger == EntryTrigger::Timed {
            return Ok(ThresholdTable::default());
        }
        let points = self
            .batches
            .iter()
            .flat_map(|b| b.members.iter().copied())
            .collect();
        ThresholdTable::new(points)
    }
}

/// Look of one batch at one instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BatchVisual {
    pub batch: usize,
    pub states: Vec<RevealState>,
    pub members: Vec<MemberVisual>,
}

impl BatchVisual {
    pub fn is_visible(&self) -> bool {
        self.members.iter().any(|m| m.opacity > 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    Future,
    Current,
    Backdrop,
    Gone,
}

#[derive(Clone, Debug)]
pub struct Choreography {
    batches: Vec<Vec<Member>>,
    offsets: Vec<usize>,
    trigger: EntryTrigger,
    wipes: Vec<usize>,
    tuning: RevealTuning,
    phase: usize,
    phase_started: f64,
    mask: RevealMask,
}

impl Choreography {
    pub fn new(spec: &ChoreographySpec, tuning: RevealTuning) -> EmberResult<Self> {
        spec.validate()?;
        let mut offsets = Vec::with_capacity(spec.batches.len());
        let mut next = 0;
        for b in &spec.batches {
            offsets.push(next);
            next += b.members.len();
        }
        Ok(Self {
            batches: spec
                .batches
                .iter()
                .map(|b| vec![Member::new(&tuning); b.members.len()])
                .collect(),
            offsets,
            trigger: spec.trigger,
            wipes: spec.wipe_phases.clone(),
            tuning,
            phase: 0,
            phase_started: 0.0,
            mask: RevealMask::with_len(next),
        })
    }

    pub fn phase(&self) -> usize {
        self.phase
    }

    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    pub fn set_tuning(&mut self, tuning: RevealTuning) {
        self.tuning = tuning;
    }

    pub fn is_wipe(&self, phase: usize) -> bool {
        self.wipes.contains(&phase)
    }

    fn role(&self, batch: usize) -> Role {
        let p = self.phase;
        if batch > p {
            Role::Future
        } else if batch == p {
            Role::Current
        } else if batch + 1 == p && !self.is_wipe(p) {
            Role::Backdrop
        } else {
            Role::Gone
        }
    }

    /// Apply a committed phase change.
    pub fn set_phase(&mut self, phase: usize, now: f64) {
        debug!(from = self.phase, to = phase, wipe = self.is_wipe(phase), "reveal phase");
        self.phase = phase;
        self.phase_started = now;
        for b in 0..self.batches.len() {
            let target = match self.role(b) {
                Role::Future => Some(RevealState::Future),
                Role::Backdrop => Some(RevealState::Backdrop),
                Role::Gone => Some(RevealState::Gone),
                Role::Current => None,
            };
            if let Some(state) = target {
                for m in &mut self.batches[b] {
                    m.transition(state, now, &self.tuning);
                }
            }
        }
        self.enter_current(now);
    }

    /// Apply a committed reveal mask (scroll entry only).
    pub fn apply_mask(&mut self, mask: &RevealMask, now: f64) {
        self.mask = mask.clone();
        self.enter_current(now);
    }

    /// Timed entries and settling of finished enter tweens.
    pub fn tick(&mut self, now: f64) {
        if self.trigger == EntryTrigger::Timed {
            self.enter_current(now);
        }
        for batch in &mut self.batches {
            for m in batch {
                m.settle(now, &self.tuning);
            }
        }
    }

    fn enter_current(&mut self, now: f64) {
        let b = self.phase;
        let Some(offset) = self.offsets.get(b).copied() else {
            return;
        };
        let tuning = self.tuning;
        for (i, m) in self.batches[b].iter_mut().enumerate() {
            let due = match self.trigger {
                EntryTrigger::Scroll => self.mask.is_set(offset + i),
                EntryTrigger::Timed => now >= self.phase_started + tuning.stagger * i as f64,
            };
            let next = if due {
                RevealState::Enter
            } else {
                RevealState::Future
            };
            m.transition(next, now, &tuning);
        }
    }

    pub fn visuals(&self, now: f64) -> Vec<BatchVisual> {
        self.batches
            .iter()
            .enumerate()
            .map(|(batch, members)| BatchVisual {
                batch,
                states: members.iter().map(Member::state).collect(),
                members: members.iter().map(|m| m.visual(now, &self.tuning)).collect(),
            })
            .collect()
    }

    pub fn any_visible(&self, now: f64) -> bool {
        self.batches
            .iter()
            .flatten()
            .any(|m| m.visual(now, &self.tuning).opacity > 0.0)
    }

    /// Back to the initial state: every member `Future`, phase 0.
    pub fn reset(&mut self) {
        for batch in &mut self.batches {
            for m in batch.iter_mut() {
                *m = Member::new(&self.tuning);
            }
        }
        self.phase = 0;
        self.phase_started = 0.0;
        self.mask = RevealMask::with_len(self.mask.len());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/choreography.rs"]
mod tests;
