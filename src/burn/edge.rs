use kurbo::BezPath;

use crate::config::knobs::BurnTuning;
use crate::foundation::core::{Canvas, Point};
use crate::noise::field::burn_edge_y;
use crate::progress::map::lerp;

/// The burn boundary for one frame: one y value per output column.
///
/// Computed once per frame and shared by the clip test and every glow pass.
#[derive(Clone, Debug, PartialEq)]
pub struct BurnEdge {
    /// `ys[x]` is the boundary height at column `x`, in frame pixels (may lie outside the frame).
    pub ys: Vec<f32>,
    pub base_y: f32,
}

impl BurnEdge {
    /// Sample the boundary for `progress` at noise `time`.
    ///
    /// The mean height travels from below the bottom edge (progress 0) to above the top edge
    /// (progress 1), far enough that neither the noise nor the glow reaches into the frame at
    /// the extremes.
    pub fn compute(progress: f32, time: f32, canvas: Canvas, tuning: &BurnTuning) -> Self {
        let w = canvas.width as usize;
        let h = canvas.height as f32;
        let amplitude = tuning.edge_amplitude * h;
        let margin = travel_margin(amplitude, tuning);
        let base_y = lerp(
            f64::from(h + margin),
            f64::from(-margin),
            f64::from(progress.clamp(0.0, 1.0)),
        ) as f32;

        let step = tuning.edge_step.max(1) as usize;
        let knots: Vec<f32> = (0..=w.div_ceil(step))
            .map(|k| {
                let x = (k * step).min(w) as f32;
                let x_norm = if w == 0 { 0.0 } else { x / w as f32 };
                burn_edge_y(x_norm, base_y, time, amplitude, &tuning.noise)
            })
            .collect();

        let ys = (0..w)
            .map(|x| {
                let k = x / step;
                let t = (x % step) as f32 / step as f32;
                let a = knots[k];
                let b = knots[(k + 1).min(knots.len() - 1)];
                a + (b - a) * t
            })
            .collect();

        Self { ys, base_y }
    }

    /// Column-center polyline of the boundary, for hosts that stroke it with a vector API.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for (x, &y) in self.ys.iter().enumerate() {
            let p = Point::new(x as f64 + 0.5, f64::from(y));
            if x == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }
        path
    }

    pub fn mean_y(&self) -> f32 {
        if self.ys.is_empty() {
            return self.base_y;
        }
        self.ys.iter().sum::<f32>() / self.ys.len() as f32
    }
}

fn travel_margin(amplitude: f32, tuning: &BurnTuning) -> f32 {
    let glow = tuning
        .glow_passes
        .iter()
        .map(|p| p.half_width + p.blur_radius as f32)
        .fold(tuning.glow_width, f32::max);
    amplitude + glow + 1.0
}

#[cfg(test)]
#[path = "../../tests/unit/burn/edge.rs"]
mod tests;
