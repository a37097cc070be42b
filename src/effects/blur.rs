//! Separable gaussian blur for single-channel coverage masks (the soft glow passes).

use rayon::prelude::*;

use crate::foundation::error::{EmberError, EmberResult};

const Q16_ONE: f64 = 65536.0;
const Q16_HALF: u64 = 1 << 15;

/// Normalized gaussian taps in Q16 fixed point, summing to exactly one, so results are
/// bit-identical across platforms.
struct Kernel {
    taps: Vec<u32>,
    radius: usize,
}

impl Kernel {
    fn gaussian(radius: u32, sigma: f32) -> EmberResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(EmberError::validation(format!("blur sigma must be > 0, got {sigma}")));
        }
        let two_s2 = 2.0 * f64::from(sigma).powi(2);
        let r = i64::from(radius);
        let raw: Vec<f64> = (-r..=r).map(|i| (-((i * i) as f64) / two_s2).exp()).collect();
        let total: f64 = raw.iter().sum();
        let mut taps: Vec<u32> = raw
            .iter()
            .map(|w| ((w / total) * Q16_ONE).round() as u32)
            .collect();

        // Rounding drift goes to the centre tap.
        let sum: i64 = taps.iter().map(|&t| i64::from(t)).sum();
        let centre = radius as usize;
        taps[centre] = (i64::from(taps[centre]) + Q16_ONE as i64 - sum).max(0) as u32;
        Ok(Self {
            taps,
            radius: radius as usize,
        })
    }

    /// Filtered value at `at` on a line of `len` samples read through `get`; edges clamp.
    fn sample(&self, len: usize, at: usize, get: impl Fn(usize) -> u8) -> u8 {
        let acc: u64 = self
            .taps
            .iter()
            .enumerate()
            .map(|(k, &w)| {
                let i = (at + k).saturating_sub(self.radius).min(len - 1);
                u64::from(w) * u64::from(get(i))
            })
            .sum();
        ((acc + Q16_HALF) >> 16).min(255) as u8
    }
}

/// Blur a `width * height` coverage mask with a gaussian of `radius` taps each side.
pub fn blur_mask(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> EmberResult<Vec<u8>> {
    let (w, h) = (width as usize, height as usize);
    let len = w
        .checked_mul(h)
        .ok_or_else(|| EmberError::render("blur buffer size overflow"))?;
    if src.len() != len {
        return Err(EmberError::render(format!(
            "blur mask holds {} bytes, expected {w}x{h}",
            src.len()
        )));
    }
    if radius == 0 || len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = Kernel::gaussian(radius, sigma)?;

    let mut rows = vec![0u8; len];
    rows.par_chunks_mut(w)
        .zip(src.par_chunks(w))
        .for_each(|(out, line)| {
            for (x, o) in out.iter_mut().enumerate() {
                *o = kernel.sample(w, x, |i| line[i]);
            }
        });

    let mut out = vec![0u8; len];
    out.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
        for (x, o) in row.iter_mut().enumerate() {
            *o = kernel.sample(h, y, |i| rows[i * w + x]);
        }
    });
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
