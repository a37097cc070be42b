use crate::foundation::error::{EmberError, EmberResult};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Normalized scroll position within a section, always inside `[0, 1]`.
///
/// Construction clamps; NaN collapses to `0.0` so an unmeasured section reads as "not started".
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Progress(f64);

impl Progress {
    /// Progress at section entry.
    pub const START: Self = Self(0.0);
    /// Progress at section exit.
    pub const END: Self = Self(1.0);

    /// Clamp `v` into `[0, 1]`.
    pub fn new(v: f64) -> Self {
        if v.is_nan() {
            return Self::START;
        }
        Self(v.clamp(0.0, 1.0))
    }

    /// Raw value in `[0, 1]`.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for Progress {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Progress> for f64 {
    fn from(value: Progress) -> Self {
        value.0
    }
}

/// Half-open progress window `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Window {
    /// Inclusive start.
    pub start: f64,
    /// Exclusive end.
    pub end: f64,
}

impl Window {
    /// Create a validated window with `0 <= start <= end <= 1`.
    pub fn new(start: f64, end: f64) -> EmberResult<Self> {
        let w = Self { start, end };
        w.validate()?;
        Ok(w)
    }

    /// Check bounds and ordering.
    pub fn validate(&self) -> EmberResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(EmberError::validation("window bounds must be finite"));
        }
        if self.start < 0.0 || self.end > 1.0 || self.start > self.end {
            return Err(EmberError::validation(format!(
                "window [{}, {}) must satisfy 0 <= start <= end <= 1",
                self.start, self.end
            )));
        }
        Ok(())
    }

    /// Return `true` when `p` is inside `[start, end)`.
    pub fn contains(self, p: Progress) -> bool {
        self.start <= p.get() && p.get() < self.end
    }

    /// Return `true` when `p` has not reached the window yet.
    pub fn is_before(self, p: Progress) -> bool {
        p.get() < self.start
    }
}

/// Output frame dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> EmberResult<Self> {
        if width == 0 || height == 0 {
            return Err(EmberError::validation("canvas dimensions must be positive"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(EmberError::validation("canvas dimensions exceed 65535"));
        }
        Ok(Self { width, height })
    }

    pub fn byte_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }

    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A rendered frame of premultiplied RGBA8 pixels, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRgba {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0; canvas.byte_len()],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Convert to straight (non-premultiplied) RGBA8 for encoders that expect it.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in px.iter_mut().take(3) {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
