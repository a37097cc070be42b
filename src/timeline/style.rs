use std::collections::BTreeMap;

use crate::foundation::core::{Affine, Point, Progress, Rect, Size, Vec2};
use crate::foundation::error::{EmberError, EmberResult};
use crate::progress::ease::Ease;
use crate::progress::map::{lerp, map_range};

/// Presentation property driven continuously by progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Opacity,
    Blur,
    Scale,
    TranslateX,
    TranslateY,
    ClipTop,
    ClipRight,
    ClipBottom,
    ClipLeft,
}

/// One ramp: `channel` goes `from -> to` while progress moves `start -> end`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleTrack {
    pub layer: String,
    pub channel: Channel,
    pub from: f64,
    pub to: f64,
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub ease: Ease,
}

impl StyleTrack {
    pub fn validate(&self) -> EmberResult<()> {
        if self.layer.trim().is_empty() {
            return Err(EmberError::validation("style track layer must be non-empty"));
        }
        let finite = [self.from, self.to, self.start, self.end]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(EmberError::validation(format!(
                "style track '{}' {:?} has non-finite values",
                self.layer, self.channel
            )));
        }
        if !(0.0..=1.0).contains(&self.start) || !(0.0..=1.0).contains(&self.end) {
            return Err(EmberError::validation(format!(
                "style track '{}' {:?} range must lie in [0, 1]",
                self.layer, self.channel
            )));
        }
        if self.start >= self.end {
            return Err(EmberError::validation(format!(
                "style track '{}' {:?} needs start < end",
                self.layer, self.channel
            )));
        }
        Ok(())
    }

    pub fn sample(&self, p: Progress) -> f64 {
        let t = self.ease.apply(map_range(p.get(), self.start, self.end));
        lerp(self.from, self.to, t)
    }
}

/// Resolved presentation values of one layer for one sample.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StyleValues {
    pub opacity: f64,
    pub blur: f64,
    pub scale: f64,
    pub translate: Vec2,
    /// Insets as fractions of the layer size: top, right, bottom, left.
    pub clip: [f64; 4],
}

impl Default for StyleValues {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            blur: 0.0,
            scale: 1.0,
            translate: Vec2::ZERO,
            clip: [0.0; 4],
        }
    }
}

impl StyleValues {
    fn set(&mut self, channel: Channel, v: f64) {
        match channel {
            Channel::Opacity => self.opacity = v.clamp(0.0, 1.0),
            Channel::Blur => self.blur = v.max(0.0),
            Channel::Scale => self.scale = v,
            Channel::TranslateX => self.translate.x = v,
            Channel::TranslateY => self.translate.y = v,
            Channel::ClipTop => self.clip[0] = v.clamp(0.0, 1.0),
            Channel::ClipRight => self.clip[1] = v.clamp(0.0, 1.0),
            Channel::ClipBottom => self.clip[2] = v.clamp(0.0, 1.0),
            Channel::ClipLeft => self.clip[3] = v.clamp(0.0, 1.0),
        }
    }

    /// Translate, then scale about `anchor`.
    pub fn transform(&self, anchor: Point) -> Affine {
        Affine::translate(self.translate)
            * Affine::translate(anchor.to_vec2())
            * Affine::scale(self.scale)
            * Affine::translate(-anchor.to_vec2())
    }

    /// Visible rectangle of a layer of `size` after clip insets.
    pub fn clip_rect(&self, size: Size) -> Rect {
        let [top, right, bottom, left] = self.clip;
        let x0 = left * size.width;
        let y0 = top * size.height;
        let x1 = (size.width - right * size.width).max(x0);
        let y1 = (size.height - bottom * size.height).max(y0);
        Rect::new(x0, y0, x1, y1)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayerStyle {
    pub layer: String,
    pub values: StyleValues,
}

/// Style tracks grouped by layer and channel, ready for per-sample evaluation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleSheet {
    layers: BTreeMap<String, BTreeMap<Channel, Vec<StyleTrack>>>,
}

impl StyleSheet {
    pub fn new(tracks: &[StyleTrack]) -> EmberResult<Self> {
        let mut layers: BTreeMap<String, BTreeMap<Channel, Vec<StyleTrack>>> = BTreeMap::new();
        for track in tracks {
            track.validate()?;
            layers
                .entry(track.layer.clone())
                .or_default()
                .entry(track.channel)
                .or_default()
                .push(track.clone());
        }
        for channels in layers.values_mut() {
            for list in channels.values_mut() {
                list.sort_by(|a, b| a.start.total_cmp(&b.start));
            }
        }
        Ok(Self { layers })
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Evaluate every layer at `p`.
    ///
    /// Several tracks on one channel chain: the latest track that has started wins, and the
    /// earliest track governs before any has started.
    pub fn evaluate(&self, p: Progress) -> Vec<LayerStyle> {
        self.layers
            .iter()
            .map(|(layer, channels)| {
                let mut values = StyleValues::default();
                for (&channel, tracks) in channels {
                    let active = tracks
                        .iter()
                        .rev()
                        .find(|t| t.start <= p.get())
                        .or_else(|| tracks.first());
                    if let Some(track) = active {
                        values.set(channel, track.sample(p));
                    }
                }
                LayerStyle {
                    layer: layer.clone(),
                    values,
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/style.rs"]
mod tests;
