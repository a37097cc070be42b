use crate::assets::decode::Readiness;
use crate::config::knobs::RevealTuning;
use crate::progress::ease::Ease;
use crate::progress::map::lerp;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    #[default]
    Char,
    Word,
}

/// A piece of copy animated as one unit. Whitespace runs are kept so the units concatenate
/// back to the source text, but they do not take a stagger slot.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TextUnit {
    pub text: String,
    pub whitespace: bool,
    /// Position in the stagger order; `None` for whitespace.
    pub order: Option<usize>,
}

pub fn split_units(text: &str, mode: SplitMode) -> Vec<TextUnit> {
    let mut units: Vec<TextUnit> = Vec::new();
    let mut order = 0;
    for ch in text.chars() {
        let ws = ch.is_whitespace();
        let extend = match units.last() {
            Some(last) => last.whitespace == ws && (ws || mode == SplitMode::Word),
            None => false,
        };
        if extend {
            if let Some(last) = units.last_mut() {
                last.text.push(ch);
            }
            continue;
        }
        units.push(TextUnit {
            text: ch.to_string(),
            whitespace: ws,
            order: (!ws).then_some(order),
        });
        if !ws {
            order += 1;
        }
    }
    units
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct UnitVisual {
    pub opacity: f64,
    pub blur: f64,
    /// Upward offset still to travel, px.
    pub lift: f64,
}

impl UnitVisual {
    pub const REST: Self = Self {
        opacity: 1.0,
        blur: 0.0,
        lift: 0.0,
    };
}

/// Staggered reveal of a block of copy, started once its fonts are ready.
///
/// If the fonts fail to load the copy is shown at rest immediately.
#[derive(Clone, Debug)]
pub struct TextReveal {
    units: Vec<TextUnit>,
    fonts: Readiness<()>,
    started_at: Option<f64>,
    stagger: f64,
    duration: f64,
    blur_start: f64,
    lift: f64,
}

impl TextReveal {
    pub fn new(text: &str, mode: SplitMode, tuning: &RevealTuning, lift: f64) -> Self {
        Self {
            units: split_units(text, mode),
            fonts: Readiness::Pending,
            started_at: None,
            stagger: tuning.stagger,
            duration: tuning.enter_duration,
            blur_start: tuning.blur_start,
            lift: lift.max(0.0),
        }
    }

    pub fn units(&self) -> &[TextUnit] {
        &self.units
    }

    pub fn set_fonts(&mut self, fonts: Readiness<()>) {
        self.fonts = fonts;
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Start the timeline on the first poll after fonts are ready.
    pub fn poll(&mut self, now: f64) {
        if self.started_at.is_none() && self.fonts.is_ready() {
            self.started_at = Some(now);
        }
    }

    pub fn restart(&mut self) {
        self.started_at = None;
    }

    pub fn unit_visual(&self, unit: usize, now: f64) -> UnitVisual {
        if self.fonts.is_failed() {
            return UnitVisual::REST;
        }
        let Some(order) = self.units.get(unit).and_then(|u| u.order) else {
            return UnitVisual::REST;
        };
        let Some(start) = self.started_at else {
            return UnitVisual {
                opacity: 0.0,
                blur: self.blur_start,
                lift: self.lift,
            };
        };
        let begin = start + self.stagger * order as f64;
        let t = if self.duration <= 0.0 {
            if now >= begin { 1.0 } else { 0.0 }
        } else {
            (now - begin) / self.duration
        };
        let t = Ease::ARRIVE.apply(t);
        UnitVisual {
            opacity: t,
            blur: lerp(self.blur_start, 0.0, t),
            lift: lerp(self.lift, 0.0, t),
        }
    }

    pub fn is_complete(&self, now: f64) -> bool {
        (0..self.units.len()).all(|i| self.unit_visual(i, now) == UnitVisual::REST)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/text.rs"]
mod tests;
