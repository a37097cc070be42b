//! Premultiplied RGBA8 pixel operations used by the burn compositor.

use crate::foundation::error::{EmberError, EmberResult};
use crate::foundation::math::{mul255, unit_to_u8};

pub type PremulRgba8 = [u8; 4];

/// Source-over of `src`, faded by `opacity`, onto `dst`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let op = unit_to_u8(opacity);
    let src = src.map(|c| mul255(c, op));
    if src[3] == 0 {
        return dst;
    }
    let keep = 255 - src[3];
    std::array::from_fn(|i| src[i].saturating_add(mul255(dst[i], keep)))
}

/// Blend `a -> b` by `t`; `t = 0` returns `a` and `t = 1` returns `b` exactly.
pub fn crossfade(a: PremulRgba8, b: PremulRgba8, t: f32) -> PremulRgba8 {
    let tb = unit_to_u8(t);
    let ta = 255 - tb;
    std::array::from_fn(|i| mul255(a[i], ta).saturating_add(mul255(b[i], tb)))
}

/// Scorch: multiply the color channels by `factor` in `[0, 1]`, keeping alpha.
pub fn scale_brightness(px: PremulRgba8, factor: f32) -> PremulRgba8 {
    let f = unit_to_u8(factor);
    if f == 255 {
        return px;
    }
    [mul255(px[0], f), mul255(px[1], f), mul255(px[2], f), px[3]]
}

/// Tint `dst` with `color` wherever `coverage` is non-zero, one coverage byte per pixel.
pub fn tint_in_place(
    dst: &mut [u8],
    coverage: &[u8],
    color: PremulRgba8,
    opacity: f32,
) -> EmberResult<()> {
    if dst.len() != coverage.len() * 4 {
        return Err(EmberError::render(format!(
            "tint needs one coverage byte per pixel: {} bytes for {} coverage",
            dst.len(),
            coverage.len()
        )));
    }
    if opacity <= 0.0 {
        return Ok(());
    }
    for (d, &m) in dst.chunks_exact_mut(4).zip(coverage) {
        if m == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], color.map(|c| mul255(c, m)), opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
