use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::core::Progress;
use crate::timeline::measure::SectionMetrics;

/// Writing half of the live progress value. There is exactly one per section.
#[derive(Debug)]
pub struct ProgressSignal {
    bits: Arc<AtomicU64>,
}

/// Reading half; clone freely.
#[derive(Clone, Debug)]
pub struct ProgressReader {
    bits: Arc<AtomicU64>,
}

impl ProgressSignal {
    pub fn new() -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(Progress::START.get().to_bits())),
        }
    }

    pub fn publish(&self, p: Progress) {
        self.bits.store(p.get().to_bits(), Ordering::Release);
    }

    pub fn reader(&self) -> ProgressReader {
        ProgressReader {
            bits: Arc::clone(&self.bits),
        }
    }
}

impl Default for ProgressSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReader {
    pub fn get(&self) -> Progress {
        Progress::new(f64::from_bits(self.bits.load(Ordering::Acquire)))
    }
}

/// Scroll and resize input gathered between two animation frames.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollInput {
    pub offset: Option<f64>,
    pub metrics: Option<SectionMetrics>,
}

/// Keeps the latest scroll offset and the latest layout measurement until the next frame.
///
/// Any number of events may arrive per frame; the frame callback drains at most one
/// coalesced [`ScrollInput`].
#[derive(Debug, Default)]
pub struct ScrollInbox {
    pending: ScrollInput,
    coalesced: u64,
}

impl ScrollInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scroll(&mut self, offset: f64) {
        if self.pending.offset.replace(offset).is_some() {
            self.coalesced += 1;
        }
    }

    pub fn push_resize(&mut self, metrics: SectionMetrics) {
        if self.pending.metrics.replace(metrics).is_some() {
            self.coalesced += 1;
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.offset.is_some() || self.pending.metrics.is_some()
    }

    pub fn take(&mut self) -> Option<ScrollInput> {
        if !self.has_pending() {
            return None;
        }
        Some(std::mem::take(&mut self.pending))
    }

    /// Events superseded before a frame consumed them.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/signal.rs"]
mod tests;
