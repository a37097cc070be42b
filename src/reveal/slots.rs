use std::f64::consts::TAU;

use crate::config::knobs::SlotTuning;
use crate::foundation::core::{Point, Size, Vec2};
use crate::foundation::error::{EmberError, EmberResult};
use crate::foundation::math::fnv1a64;
use crate::progress::rng::SeededRandom;

/// Redraws allowed per slot when the pick repeats its left neighbour.
pub const MAX_ASSIGN_RETRIES: usize = 20;

/// Fixed placement hosting a rotating "sparkle" image.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Slot {
    pub position: Point,
    pub size: Size,
    /// 0 = pinned to the page, 1 = full parallax.
    #[serde(default)]
    pub depth: f64,
    /// Scale on the `slots.float_amplitude` knob.
    #[serde(default = "default_float_amplitude")]
    pub float_amplitude: f64,
    /// Float phase offset in turns.
    #[serde(default)]
    pub phase: f64,
}

fn default_float_amplitude() -> f64 {
    1.0
}

impl Slot {
    pub fn validate(&self) -> EmberResult<()> {
        if !self.float_amplitude.is_finite() || self.float_amplitude < 0.0 {
            return Err(EmberError::validation(format!(
                "slot float amplitude must be finite and >= 0, got {}",
                self.float_amplitude
            )));
        }
        Ok(())
    }

    /// Displacement from parallax plus idle float.
    ///
    /// `pointer` is the pointer position relative to the viewport centre, normalized to
    /// `[-1, 1]` on both axes.
    pub fn offset(&self, pointer: Vec2, time: f64, tuning: &SlotTuning) -> Vec2 {
        let parallax = -pointer * (self.depth * tuning.parallax);
        let turns = if tuning.float_period > 0.0 {
            time / tuning.float_period
        } else {
            0.0
        };
        let amplitude = self.float_amplitude * tuning.float_amplitude;
        let float = (TAU * (turns + self.phase)).sin() * amplitude;
        parallax + Vec2::new(0.0, float)
    }
}

fn slot_seed(wave: u64, slot: usize, seed: u64) -> u64 {
    fnv1a64(&[wave, slot as u64, seed])
}

/// Pick image identities from a pool of `pool_len` for `n` slots in wave `wave`.
///
/// Deterministic in `(n, wave, pool_len, seed)`. Each slot redraws up to
/// [`MAX_ASSIGN_RETRIES`] times while it repeats its neighbour, so adjacent entries differ
/// whenever the pool allows it, best effort.
pub fn assign_images(n: usize, wave: u64, pool_len: usize, seed: u64) -> Vec<usize> {
    if pool_len == 0 {
        return Vec::new();
    }
    let mut out: Vec<usize> = Vec::with_capacity(n);
    for slot in 0..n {
        let mut rng = SeededRandom::new(slot_seed(wave, slot, seed));
        let mut pick = rng.next_index(pool_len);
        if let Some(&prev) = out.last() {
            let mut tries = 0;
            while pick == prev && pool_len > 1 && tries < MAX_ASSIGN_RETRIES {
                pick = rng.next_index(pool_len);
                tries += 1;
            }
        }
        out.push(pick);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/slots.rs"]
mod tests;
