/// Linear interpolation `a + (b - a) * t`. `t` is not clamped.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Remap `x` from `[lo, hi]` to `[0, 1]`, clamped.
///
/// Callers guarantee `hi != lo`; a degenerate range is treated as a step at `lo` instead of
/// dividing by zero.
pub fn map_range(x: f64, lo: f64, hi: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    if hi == lo {
        return if x >= lo { 1.0 } else { 0.0 };
    }
    ((x - lo) / (hi - lo)).clamp(0.0, 1.0)
}

/// Remap into `[from, to]`: `lerp(from, to, map_range(x, lo, hi))`.
pub fn map_between(x: f64, lo: f64, hi: f64, from: f64, to: f64) -> f64 {
    lerp(from, to, map_range(x, lo, hi))
}

#[cfg(test)]
#[path = "../../tests/unit/progress/map.rs"]
mod tests;
