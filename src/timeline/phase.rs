use crate::foundation::core::Progress;
use crate::foundation::error::{EmberError, EmberResult};
use crate::progress::mask::ThresholdTable;

/// Start progress of each phase, non-decreasing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct PhaseTable {
    starts: ThresholdTable,
}

impl PhaseTable {
    pub fn new(starts: Vec<f64>) -> EmberResult<Self> {
        if starts.is_empty() {
            return Err(EmberError::validation("phase table needs at least one phase"));
        }
        Ok(Self {
            starts: ThresholdTable::new(starts)?,
        })
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn start_of(&self, phase: usize) -> Option<f64> {
        self.starts.points().get(phase).copied()
    }

    /// Highest `i` with `p >= start[i]`; phase 0 before the first start.
    pub fn phase_at(&self, p: Progress) -> usize {
        self.starts.crossed(p).saturating_sub(1)
    }
}

impl TryFrom<Vec<f64>> for PhaseTable {
    type Error = EmberError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhaseTable> for Vec<f64> {
    fn from(value: PhaseTable) -> Self {
        value.starts.into()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PhaseChange {
    pub from: usize,
    pub to: usize,
}

impl PhaseChange {
    pub fn is_advance(self) -> bool {
        self.to > self.from
    }
}

/// Last-committed phase; commits are edge-triggered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseGate {
    committed: usize,
}

impl PhaseGate {
    pub fn new(initial: usize) -> Self {
        Self { committed: initial }
    }

    pub fn committed(&self) -> usize {
        self.committed
    }

    /// Commit `next`; `Some` only when it differs from the last committed phase.
    pub fn commit(&mut self, next: usize) -> Option<PhaseChange> {
        if next == self.committed {
            return None;
        }
        let change = PhaseChange {
            from: self.committed,
            to: next,
        };
        self.committed = next;
        tracing::debug!(from = change.from, to = change.to, "phase commit");
        Some(change)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/phase.rs"]
mod tests;
