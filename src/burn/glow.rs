use rayon::prelude::*;

use crate::burn::edge::BurnEdge;
use crate::config::knobs::GlowPass;
use crate::effects::blur::blur_mask;
use crate::effects::composite::{PremulRgba8, tint_in_place};
use crate::foundation::core::Canvas;
use crate::foundation::error::EmberResult;

/// Fire palette from the outermost (widest) pass to the core stroke.
pub const GLOW_PALETTE: [PremulRgba8; 4] = [
    [255, 84, 12, 255],
    [255, 140, 36, 255],
    [255, 200, 110, 255],
    [255, 246, 224, 255],
];

/// Anti-aliased coverage of the band `|y - edge(x)| <= half_width`, one byte per pixel.
pub fn band_mask(edge: &BurnEdge, canvas: Canvas, half_width: f32) -> Vec<u8> {
    let w = canvas.width as usize;
    let mut mask = vec![0u8; w * canvas.height as usize];
    mask.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
        let yc = y as f32 + 0.5;
        for (x, m) in row.iter_mut().enumerate() {
            let d = (yc - edge.ys[x]).abs();
            let coverage = (half_width + 0.5 - d).clamp(0.0, 1.0);
            *m = (coverage * 255.0).round() as u8;
        }
    });
    mask
}

/// Draw each glow pass over `frame`: a band around the edge, blurred, tinted and composited.
pub fn apply_glow(
    frame: &mut [u8],
    edge: &BurnEdge,
    canvas: Canvas,
    passes: &[GlowPass],
) -> EmberResult<()> {
    for (i, pass) in passes.iter().enumerate() {
        if pass.opacity <= 0.0 {
            continue;
        }
        let band = band_mask(edge, canvas, pass.half_width);
        if band.iter().all(|&m| m == 0) {
            continue;
        }
        let band = if pass.blur_radius > 0 {
            let sigma = (pass.blur_radius as f32 / 2.0).max(0.5);
            blur_mask(&band, canvas.width, canvas.height, pass.blur_radius, sigma)?
        } else {
            band
        };
        let color = GLOW_PALETTE[i.min(GLOW_PALETTE.len() - 1)];
        tint_in_place(frame, &band, color, pass.opacity)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/burn/glow.rs"]
mod tests;
