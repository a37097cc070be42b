use rayon::prelude::*;

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Canvas, FrameRgba, Rect};

/// Aspect-preserving scale-and-crop of a source onto a frame.
///
/// The source is scaled to fill the frame and centered; overflow along the longer axis is cropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl CoverFit {
    pub fn new(src_w: u32, src_h: u32, canvas: Canvas) -> Self {
        let (sw, sh) = (f64::from(src_w.max(1)), f64::from(src_h.max(1)));
        let (dw, dh) = (f64::from(canvas.width), f64::from(canvas.height));
        let scale = (dw / sw).max(dh / sh);
        Self {
            scale,
            offset_x: (dw - sw * scale) / 2.0,
            offset_y: (dh - sh * scale) / 2.0,
        }
    }

    /// The part of the source that ends up visible, in source pixels.
    pub fn source_rect(&self, canvas: Canvas) -> Rect {
        let x0 = -self.offset_x / self.scale;
        let y0 = -self.offset_y / self.scale;
        Rect::new(
            x0,
            y0,
            x0 + f64::from(canvas.width) / self.scale,
            y0 + f64::from(canvas.height) / self.scale,
        )
    }

    fn source_point(&self, x: u32, y: u32) -> (f64, f64) {
        (
            (f64::from(x) + 0.5 - self.offset_x) / self.scale - 0.5,
            (f64::from(y) + 0.5 - self.offset_y) / self.scale - 0.5,
        )
    }
}

/// Render `img` cover-fit into a frame of `canvas` size with bilinear sampling.
pub fn cover_fit(img: &PreparedImage, canvas: Canvas) -> FrameRgba {
    let fit = CoverFit::new(img.width, img.height, canvas);
    let mut frame = FrameRgba::new(canvas);
    let row_len = canvas.width as usize * 4;
    frame
        .data
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let (sx, sy) = fit.source_point(x as u32, y as u32);
                px.copy_from_slice(&sample_bilinear(img, sx, sy));
            }
        });
    frame
}

fn sample_bilinear(img: &PreparedImage, sx: f64, sy: f64) -> [u8; 4] {
    let max_x = f64::from(img.width - 1);
    let max_y = f64::from(img.height - 1);
    let sx = sx.clamp(0.0, max_x);
    let sy = sy.clamp(0.0, max_y);
    let x0 = sx.floor();
    let y0 = sy.floor();
    let fx = sx - x0;
    let fy = sy - y0;
    let x0 = x0 as u32;
    let y0 = y0 as u32;
    let x1 = (x0 + 1).min(img.width - 1);
    let y1 = (y0 + 1).min(img.height - 1);

    let a = img.texel(x0, y0);
    let b = img.texel(x1, y0);
    let c = img.texel(x0, y1);
    let d = img.texel(x1, y1);

    let mut out = [0u8; 4];
    for i in 0..4 {
        let top = f64::from(a[i]) + (f64::from(b[i]) - f64::from(a[i])) * fx;
        let bottom = f64::from(c[i]) + (f64::from(d[i]) - f64::from(c[i])) * fx;
        out[i] = (top + (bottom - top) * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/burn/cover.rs"]
mod tests;
