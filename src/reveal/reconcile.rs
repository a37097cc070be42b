//! Reconciling scroll-derived phases with an autoplay timer.
//!
//! A section picks one policy. Both feed the same [`PhaseGate`], so a phase only regresses
//! through scroll under the scroll-authoritative policy or through [`PhaseReconciler::select`].

use tracing::debug;

use crate::foundation::error::{EmberError, EmberResult};
use crate::timeline::phase::{PhaseChange, PhaseGate};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcilePolicy {
    /// The timer drives; scroll may fast-forward it but never rewind it.
    TimerAssist,
    /// Scroll decides; the timer only autoplays between scroll inputs.
    #[default]
    ScrollAuthoritative,
}

/// Timer-assist merge: never behind the committed phase.
pub fn merge_timer_assist(committed: usize, scroll_phase: usize) -> usize {
    committed.max(scroll_phase)
}

/// Scroll-authoritative merge: the scroll phase wins outright.
pub fn merge_scroll_authoritative(_committed: usize, scroll_phase: usize) -> usize {
    scroll_phase
}

/// Countdown to the next autoplay advance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseTimer {
    interval: f64,
    elapsed: f64,
}

impl PhaseTimer {
    pub fn new(interval: f64) -> EmberResult<Self> {
        if !interval.is_finite() || interval <= 0.0 {
            return Err(EmberError::validation(format!(
                "phase interval must be > 0, got {interval}"
            )));
        }
        Ok(Self {
            interval,
            elapsed: 0.0,
        })
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn remaining(&self) -> f64 {
        (self.interval - self.elapsed).max(0.0)
    }

    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }

    /// Advance by `dt`; `true` when the countdown expired (and restarted).
    pub fn tick(&mut self, dt: f64) -> bool {
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
            return true;
        }
        false
    }
}

#[derive(Clone, Debug)]
pub struct PhaseReconciler {
    policy: ReconcilePolicy,
    gate: PhaseGate,
    timer: PhaseTimer,
    phase_count: usize,
    autoplay: bool,
}

impl PhaseReconciler {
    pub fn new(policy: ReconcilePolicy, phase_count: usize, interval: f64) -> EmberResult<Self> {
        if phase_count == 0 {
            return Err(EmberError::validation("reconciler needs at least one phase"));
        }
        Ok(Self {
            policy,
            gate: PhaseGate::new(0),
            timer: PhaseTimer::new(interval)?,
            phase_count,
            autoplay: true,
        })
    }

    pub fn policy(&self) -> ReconcilePolicy {
        self.policy
    }

    pub fn phase(&self) -> usize {
        self.gate.committed()
    }

    pub fn timer(&self) -> &PhaseTimer {
        &self.timer
    }

    /// Change the autoplay interval. The countdown restarts.
    pub fn set_interval(&mut self, interval: f64) -> EmberResult<()> {
        self.timer = PhaseTimer::new(interval)?;
        Ok(())
    }

    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.autoplay = autoplay;
        self.timer.restart();
    }

    pub fn is_autoplay(&self) -> bool {
        self.autoplay
    }

    fn clamp(&self, phase: usize) -> usize {
        phase.min(self.phase_count - 1)
    }

    /// Merge a scroll-derived phase according to the policy.
    pub fn on_scroll(&mut self, scroll_phase: usize) -> Option<PhaseChange> {
        let scroll_phase = self.clamp(scroll_phase);
        let committed = self.gate.committed();
        let next = match self.policy {
            ReconcilePolicy::TimerAssist => merge_timer_assist(committed, scroll_phase),
            ReconcilePolicy::ScrollAuthoritative => {
                merge_scroll_authoritative(committed, scroll_phase)
            }
        };
        let change = self.gate.commit(next);
        match self.policy {
            // A forced advance gives the new phase a full interval.
            ReconcilePolicy::TimerAssist if change.is_some() => self.timer.restart(),
            ReconcilePolicy::ScrollAuthoritative => self.timer.restart(),
            ReconcilePolicy::TimerAssist => {}
        }
        change
    }

    /// Advance the autoplay timer. Stops at the last phase.
    pub fn on_tick(&mut self, dt: f64) -> Option<PhaseChange> {
        if !self.autoplay || self.gate.committed() + 1 >= self.phase_count {
            return None;
        }
        if !self.timer.tick(dt) {
            return None;
        }
        let next = self.gate.committed() + 1;
        debug!(phase = next, "autoplay advance");
        self.gate.commit(next)
    }

    /// Explicit user selection (e.g. a phase indicator). May move backwards.
    pub fn select(&mut self, phase: usize) -> Option<PhaseChange> {
        let phase = self.clamp(phase);
        self.timer.restart();
        self.gate.commit(phase)
    }

    pub fn reset(&mut self) {
        self.gate = PhaseGate::new(0);
        self.timer.restart();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/reconcile.rs"]
mod tests;
