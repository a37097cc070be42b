use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{EmberError, EmberResult};

/// A decoded raster in premultiplied RGBA8 with its natural dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap straight RGBA8 pixels, premultiplying them.
    pub fn from_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> EmberResult<Self> {
        if width == 0 || height == 0 {
            return Err(EmberError::validation("image dimensions must be positive"));
        }
        if rgba.len() != (width as usize) * (height as usize) * 4 {
            return Err(EmberError::validation(
                "image buffer must match width*height*4",
            ));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }

    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    pub(crate) fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let d = &self.rgba8_premul;
        [d[idx], d[idx + 1], d[idx + 2], d[idx + 3]]
    }
}

impl TryFrom<image::RgbaImage> for PreparedImage {
    type Error = EmberError;

    fn try_from(value: image::RgbaImage) -> EmberResult<Self> {
        let (width, height) = value.dimensions();
        Self::from_rgba8(width, height, value.into_raw())
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> EmberResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    PreparedImage::try_from(dyn_img.to_rgba8())
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> EmberResult<PreparedImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Asynchronous load state of a resource the render loop depends on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Readiness<T> {
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> Readiness<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            Self::Pending | Self::Failed(_) => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl<T> From<EmberResult<T>> for Readiness<T> {
    fn from(value: EmberResult<T>) -> Self {
        match value {
            Ok(v) => Self::Ready(v),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
