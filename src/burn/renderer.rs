use rayon::prelude::*;

use crate::assets::decode::{PreparedImage, Readiness};
use crate::burn::cover::cover_fit;
use crate::burn::edge::BurnEdge;
use crate::burn::glow::apply_glow;
use crate::config::knobs::BurnTuning;
use crate::effects::composite::{crossfade, scale_brightness};
use crate::foundation::core::{Canvas, FrameRgba, Progress};
use crate::foundation::error::{EmberError, EmberResult};
use crate::foundation::math::smoothstep;

/// Composite one burn frame from two cover-fit buffers of `canvas` size.
///
/// Above the edge shows `before`; below shows `after`, scorched close to the edge and recovering
/// with depth; a soft band of `tuning.glow_width` blends the two; glow passes go on top.
/// Progress at or beyond either end returns the matching input untouched.
///
/// The scorch darkens `after` to `tuning.scorch_brightness` at the edge and fades out over
/// `tuning.scorch_depth` of the frame height, so the frame at progress 1 is `after` itself
/// rather than a dimmed copy of it.
pub fn composite_burn(
    before: &FrameRgba,
    after: &FrameRgba,
    progress: Progress,
    time: f32,
    tuning: &BurnTuning,
) -> EmberResult<FrameRgba> {
    if before.width != after.width || before.height != after.height {
        return Err(EmberError::render("burn inputs must share dimensions"));
    }
    let canvas = Canvas::new(before.width, before.height)?;
    if before.data.len() != canvas.byte_len() || after.data.len() != canvas.byte_len() {
        return Err(EmberError::render(
            "burn inputs must hold width*height*4 bytes",
        ));
    }
    if progress.get() <= 0.0 {
        return Ok(before.clone());
    }
    if progress.get() >= 1.0 {
        return Ok(after.clone());
    }

    let edge = BurnEdge::compute(progress.get() as f32, time, canvas, tuning);
    let mut out = FrameRgba::new(canvas);
    let row_len = canvas.width as usize * 4;
    let band = tuning.glow_width.max(0.0);
    let scorch = tuning.scorch_brightness;
    let depth = (tuning.scorch_depth * canvas.height as f32).max(1.0);

    out.data
        .par_chunks_mut(row_len)
        .zip(before.data.par_chunks(row_len))
        .zip(after.data.par_chunks(row_len))
        .enumerate()
        .for_each(|(y, ((dst, b_row), a_row))| {
            let yc = y as f32 + 0.5;
            for (x, ((d, b), a)) in dst
                .chunks_exact_mut(4)
                .zip(b_row.chunks_exact(4))
                .zip(a_row.chunks_exact(4))
                .enumerate()
            {
                let dist = yc - edge.ys[x];
                let b = [b[0], b[1], b[2], b[3]];
                let a = [a[0], a[1], a[2], a[3]];
                let px = if dist < -band {
                    b
                } else {
                    let brightness = scorch + (1.0 - scorch) * smoothstep(0.0, depth, dist.max(0.0));
                    let scorched = scale_brightness(a, brightness);
                    if band <= 0.0 {
                        if dist < 0.0 { b } else { scorched }
                    } else if dist >= band {
                        scorched
                    } else {
                        crossfade(b, scorched, smoothstep(-band, band, dist))
                    }
                };
                d.copy_from_slice(&px);
            }
        });

    apply_glow(&mut out.data, &edge, canvas, &tuning.glow_passes)?;
    Ok(out)
}

/// Per-section burn compositor state.
///
/// Owns both source images, their cover-fit caches and the noise time accumulator. Frames are
/// only produced once both images are ready.
pub struct BurnRenderer {
    canvas: Canvas,
    tuning: BurnTuning,
    before: Readiness<PreparedImage>,
    after: Readiness<PreparedImage>,
    before_fit: Option<FrameRgba>,
    after_fit: Option<FrameRgba>,
    time: f32,
    running: bool,
}

impl BurnRenderer {
    pub fn new(canvas: Canvas, tuning: BurnTuning) -> Self {
        Self {
            canvas,
            tuning,
            before: Readiness::Pending,
            after: Readiness::Pending,
            before_fit: None,
            after_fit: None,
            time: 0.0,
            running: false,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn tuning(&self) -> &BurnTuning {
        &self.tuning
    }

    pub fn set_tuning(&mut self, tuning: BurnTuning) {
        self.tuning = tuning;
    }

    /// Report the load outcome for the `before` image.
    pub fn set_before(&mut self, img: Readiness<PreparedImage>) {
        self.before_fit = img.ready().map(|i| cover_fit(i, self.canvas));
        self.before = img;
        self.sync_running();
    }

    /// Report the load outcome for the `after` image.
    pub fn set_after(&mut self, img: Readiness<PreparedImage>) {
        self.after_fit = img.ready().map(|i| cover_fit(i, self.canvas));
        self.after = img;
        self.sync_running();
    }

    /// Both images decoded; the render loop may run.
    pub fn is_ready(&self) -> bool {
        self.before_fit.is_some() && self.after_fit.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Re-fit cached images after a viewport change.
    pub fn resize(&mut self, canvas: Canvas) {
        if canvas == self.canvas {
            return;
        }
        self.canvas = canvas;
        self.before_fit = self.before.ready().map(|i| cover_fit(i, canvas));
        self.after_fit = self.after.ready().map(|i| cover_fit(i, canvas));
    }

    /// Advance the noise clock by one nominal frame step.
    pub fn tick(&mut self) -> f32 {
        if self.running {
            self.time += self.tuning.time_step.max(f32::EPSILON);
        }
        self.time
    }

    /// Render the frame for `progress`, or `None` while either image is missing.
    #[tracing::instrument(level = "trace", skip(self), fields(time = self.time))]
    pub fn render(&self, progress: Progress) -> EmberResult<Option<FrameRgba>> {
        let (Some(before), Some(after)) = (&self.before_fit, &self.after_fit) else {
            return Ok(None);
        };
        composite_burn(before, after, progress, self.time, &self.tuning).map(Some)
    }

    /// Static stand-in when the effect cannot run: whichever image is available, `before` first.
    pub fn fallback_frame(&self) -> Option<FrameRgba> {
        self.before_fit.clone().or_else(|| self.after_fit.clone())
    }

    /// Stop the loop and drop decoded resources.
    pub fn teardown(&mut self) {
        if self.running {
            tracing::debug!("burn render loop stopped");
        }
        self.running = false;
        self.before = Readiness::Pending;
        self.after = Readiness::Pending;
        self.before_fit = None;
        self.after_fit = None;
    }

    fn sync_running(&mut self) {
        let ready = self.is_ready();
        if ready && !self.running {
            tracing::debug!(
                width = self.canvas.width,
                height = self.canvas.height,
                "burn render loop started"
            );
        }
        if self.before.is_failed() || self.after.is_failed() {
            tracing::warn!("burn image failed to load; effect stays static");
        }
        self.running = ready;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/burn/renderer.rs"]
mod tests;
