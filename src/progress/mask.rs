use smallvec::SmallVec;

use crate::foundation::core::Progress;
use crate::foundation::error::{EmberError, EmberResult};

/// Ordered progress breakpoints, one per discrete event.
///
/// Strictly non-decreasing; equal entries fire together.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ThresholdTable {
    points: Vec<f64>,
}

impl ThresholdTable {
    pub fn new(points: Vec<f64>) -> EmberResult<Self> {
        for (i, &p) in points.iter().enumerate() {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(EmberError::validation(format!(
                    "threshold[{i}] = {p} must be finite and inside [0, 1]"
                )));
            }
            if i > 0 && p < points[i - 1] {
                return Err(EmberError::validation(format!(
                    "threshold[{i}] = {p} decreases from {}",
                    points[i - 1]
                )));
            }
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Number of thresholds `p` has reached (`p >= threshold`).
    pub fn crossed(&self, p: Progress) -> usize {
        let p = p.get();
        self.points.partition_point(|&t| t <= p)
    }

    /// Bit `i` is set iff `p >= threshold[i]`.
    pub fn mask(&self, p: Progress) -> RevealMask {
        let mut mask = RevealMask::with_len(self.points.len());
        for i in 0..self.crossed(p) {
            mask.set(i);
        }
        mask
    }
}

impl TryFrom<Vec<f64>> for ThresholdTable {
    type Error = EmberError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ThresholdTable> for Vec<f64> {
    fn from(value: ThresholdTable) -> Self {
        value.points
    }
}

/// Bitset over entity indices.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RevealMask {
    len: usize,
    words: SmallVec<[u64; 2]>,
}

impl RevealMask {
    pub fn with_len(len: usize) -> Self {
        Self {
            len,
            words: SmallVec::from_elem(0, len.div_ceil(64)),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set bit `i`; out-of-range indices are ignored.
    pub fn set(&mut self, i: usize) {
        if i < self.len {
            self.words[i / 64] |= 1u64 << (i % 64);
        }
    }

    pub fn is_set(&self, i: usize) -> bool {
        i < self.len && self.words[i / 64] & (1u64 << (i % 64)) != 0
    }

    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn iter_set(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(|&i| self.is_set(i))
    }

    /// Return `true` when every bit set in `self` is also set in `other`.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.iter_set().all(|i| other.is_set(i))
    }
}

/// Change-detection gate: only a differing mask is worth a state commit.
pub fn has_crossed_new_threshold(prev: &RevealMask, next: &RevealMask) -> bool {
    prev != next
}

/// Holds the last committed mask and reports only changes.
#[derive(Clone, Debug, Default)]
pub struct MaskGate {
    committed: RevealMask,
}

impl MaskGate {
    pub fn new(len: usize) -> Self {
        Self {
            committed: RevealMask::with_len(len),
        }
    }

    pub fn committed(&self) -> &RevealMask {
        &self.committed
    }

    /// Commit `next` if it differs from the last committed mask.
    pub fn commit(&mut self, next: RevealMask) -> Option<&RevealMask> {
        if !has_crossed_new_threshold(&self.committed, &next) {
            return None;
        }
        tracing::debug!(
            from = self.committed.count(),
            to = next.count(),
            "reveal mask commit"
        );
        self.committed = next;
        Some(&self.committed)
    }

    pub fn reset(&mut self) {
        self.committed = RevealMask::with_len(self.committed.len());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/mask.rs"]
mod tests;
