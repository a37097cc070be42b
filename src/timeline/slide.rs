use crate::foundation::core::Progress;
use crate::foundation::error::{EmberError, EmberResult};
use crate::progress::ease::Ease;
use crate::progress::map::{lerp, map_range};

/// Horizontal offset reached at progress `at`, arriving with `ease`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlideStop {
    pub at: f64,
    pub offset: f64,
    #[serde(default)]
    pub ease: Ease,
}

/// Piecewise map from progress to a horizontal translation.
///
/// Two consecutive stops with the same offset form a hold plateau: the track stays put while
/// progress keeps rising.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<SlideStop>", into = "Vec<SlideStop>")]
pub struct SlideTrack {
    stops: Vec<SlideStop>,
}

impl SlideTrack {
    pub fn new(stops: Vec<SlideStop>) -> EmberResult<Self> {
        for (i, s) in stops.iter().enumerate() {
            if !s.at.is_finite() || !s.offset.is_finite() {
                return Err(EmberError::validation(format!(
                    "slide stop {i} must be finite"
                )));
            }
            if !(0.0..=1.0).contains(&s.at) {
                return Err(EmberError::validation(format!(
                    "slide stop {i} at {} is outside [0, 1]",
                    s.at
                )));
            }
        }
        if stops.windows(2).any(|w| w[1].at < w[0].at) {
            return Err(EmberError::validation(
                "slide stops must be non-decreasing in progress",
            ));
        }
        Ok(Self { stops })
    }

    /// Evenly spaced panels of `panel_width`, where panel `i` dwells for `holds[i]` of the
    /// section's progress and the remainder is shared by the moves between panels.
    pub fn panels(panel_width: f64, holds: &[f64], ease: Ease) -> EmberResult<Self> {
        if holds.is_empty() {
            return Ok(Self::default());
        }
        if !panel_width.is_finite() || panel_width < 0.0 {
            return Err(EmberError::validation("panel width must be finite and >= 0"));
        }
        if holds.iter().any(|h| !h.is_finite() || *h < 0.0) {
            return Err(EmberError::validation("panel holds must be finite and >= 0"));
        }
        let total: f64 = holds.iter().sum();
        if total > 1.0 + 1e-9 {
            return Err(EmberError::validation(format!(
                "panel holds sum to {total}, more than the whole section"
            )));
        }

        let moves = holds.len().saturating_sub(1);
        let step = if moves == 0 {
            0.0
        } else {
            (1.0 - total).max(0.0) / moves as f64
        };

        let mut stops = Vec::with_capacity(holds.len() * 2);
        let mut at = 0.0f64;
        for (i, hold) in holds.iter().enumerate() {
            let offset = -(i as f64) * panel_width;
            stops.push(SlideStop { at: at.min(1.0), offset, ease });
            at += hold;
            stops.push(SlideStop { at: at.min(1.0), offset, ease });
            at += step;
        }
        Self::new(stops)
    }

    pub fn stops(&self) -> &[SlideStop] {
        &self.stops
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn sample(&self, p: Progress) -> f64 {
        let p = p.get();
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return 0.0;
        };
        if p <= first.at {
            return first.offset;
        }
        if p >= last.at {
            return last.offset;
        }
        // First stop strictly after p; the segment ends there.
        let idx = self.stops.partition_point(|s| s.at <= p);
        let a = self.stops[idx - 1];
        let b = self.stops[idx];
        let t = b.ease.apply(map_range(p, a.at, b.at));
        lerp(a.offset, b.offset, t)
    }

    /// Index of the plateau (counted among plateaus) holding at `p`, if any.
    pub fn hold_at(&self, p: Progress) -> Option<usize> {
        let p = p.get();
        self.stops
            .windows(2)
            .filter(|w| w[0].offset == w[1].offset && w[0].at < w[1].at)
            .position(|w| p >= w[0].at && p <= w[1].at)
    }
}

impl TryFrom<Vec<SlideStop>> for SlideTrack {
    type Error = EmberError;

    fn try_from(value: Vec<SlideStop>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SlideTrack> for Vec<SlideStop> {
    fn from(value: SlideTrack) -> Self {
        value.stops
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/slide.rs"]
mod tests;
