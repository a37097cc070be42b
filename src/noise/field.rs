use crate::foundation::math::lattice_hash01;

/// Shape of the fractal noise and of the burn-edge domain warp.
///
/// `burn_edge_y` samples `fbm(x * x_scale + t * x_drift, t * y_drift + x * y_skew)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    pub octaves: u32,
    pub x_scale: f32,
    pub x_drift: f32,
    pub y_drift: f32,
    pub y_skew: f32,
    pub seed: u32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            octaves: 5,
            x_scale: 4.0,
            x_drift: 0.25,
            y_drift: 0.6,
            y_skew: 1.3,
            seed: 0,
        }
    }
}

impl NoiseParams {
    pub const MAX_OCTAVES: u32 = 8;
}

/// Value noise on the integer lattice, in `[0, 1]`.
///
/// Bilinear blend of the four surrounding lattice hashes with `3t² - 2t³` smoothing.
pub fn value_noise_2d(x: f32, y: f32, seed: u32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let ix = x0 as i32;
    let iy = y0 as i32;
    let fx = x - x0;
    let fy = y - y0;
    let sx = fx * fx * (3.0 - 2.0 * fx);
    let sy = fy * fy * (3.0 - 2.0 * fy);

    let a = lattice_hash01(ix, iy, seed);
    let b = lattice_hash01(ix + 1, iy, seed);
    let c = lattice_hash01(ix, iy + 1, seed);
    let d = lattice_hash01(ix + 1, iy + 1, seed);

    let top = a + (b - a) * sx;
    let bottom = c + (d - c) * sx;
    top + (bottom - top) * sy
}

/// Fractal Brownian motion over [`value_noise_2d`], recentered to `[-1, 1]`.
///
/// Each octave doubles frequency and halves amplitude. `octaves` is clamped to
/// `1..=NoiseParams::MAX_OCTAVES`.
pub fn fbm_2d(x: f32, y: f32, octaves: u32, seed: u32) -> f32 {
    let octaves = octaves.clamp(1, NoiseParams::MAX_OCTAVES);
    let mut value = 0.0;
    let mut norm = 0.0;
    let mut amplitude = 0.5;
    let mut frequency = 1.0;
    for i in 0..octaves {
        value += amplitude * value_noise_2d(x * frequency, y * frequency, seed.wrapping_add(i));
        norm += amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }
    (value / norm) * 2.0 - 1.0
}

/// Vertical position of the burn boundary at horizontal sample `x_norm` (0 = left, 1 = right).
///
/// `base_y + fbm(...) * amplitude`. Pure: identical inputs give identical output.
pub fn burn_edge_y(x_norm: f32, base_y: f32, time: f32, amplitude: f32, p: &NoiseParams) -> f32 {
    let n = fbm_2d(
        x_norm * p.x_scale + time * p.x_drift,
        time * p.y_drift + x_norm * p.y_skew,
        p.octaves,
        p.seed,
    );
    base_y + n * amplitude
}

#[cfg(test)]
#[path = "../../tests/unit/noise/field.rs"]
mod tests;
