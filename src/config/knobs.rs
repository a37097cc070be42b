//! Runtime tuning knobs.
//!
//! A flat, namespaced set of numeric parameters (`burn.glow_width`, `reveal.stagger`, ...). Each
//! knob documents its default and its `[min, max]` range; writes are clamped into that range.
//! Knobs only change how motion feels. Nothing that must hold for correctness reads them.

use std::collections::BTreeMap;

use crate::foundation::error::{EmberError, EmberResult};
use crate::noise::field::NoiseParams;

/// Prefix for environment overrides: `EMBERLINE_BURN_GLOW_WIDTH` sets `burn.glow_width`.
pub const ENV_PREFIX: &str = "EMBERLINE_";

/// Static description of one knob.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnobDef {
    pub key: &'static str,
    pub doc: &'static str,
    pub default: f64,
    pub min: f64,
    pub max: f64,
}

const fn knob(key: &'static str, doc: &'static str, default: f64, min: f64, max: f64) -> KnobDef {
    KnobDef {
        key,
        doc,
        default,
        min,
        max,
    }
}

pub const KNOB_DEFS: &[KnobDef] = &[
    knob("burn.glow_width", "half-width of the glow band around the edge, px", 18.0, 0.0, 96.0),
    knob("burn.edge_amplitude", "edge displacement as a fraction of frame height", 0.06, 0.0, 0.3),
    knob("burn.edge_step", "horizontal spacing of boundary samples, px", 4.0, 1.0, 64.0),
    knob("burn.scorch_brightness", "brightness of the revealed image at the edge", 0.4, 0.0, 1.0),
    knob("burn.scorch_depth", "depth over which scorching fades, fraction of height", 0.25, 0.0, 1.0),
    knob("burn.bloom_intensity", "multiplier on glow pass opacities", 1.0, 0.0, 3.0),
    knob("burn.time_step", "noise time added per frame callback, seconds", 1.0 / 60.0, 0.001, 0.1),
    knob("noise.scale", "horizontal frequency of the edge noise", 4.0, 0.1, 32.0),
    knob("noise.octaves", "fbm octave count", 5.0, 1.0, 8.0),
    knob("noise.drift", "horizontal drift of the noise per second", 0.25, 0.0, 4.0),
    knob("noise.flicker", "vertical noise travel per second", 0.6, 0.0, 4.0),
    knob("noise.skew", "horizontal contribution to the vertical noise axis", 1.3, 0.0, 8.0),
    knob("reveal.stagger", "delay between consecutive members entering, seconds", 0.08, 0.0, 1.0),
    knob("reveal.blur_start", "blur radius a member enters with, px", 12.0, 0.0, 64.0),
    knob("reveal.scale_start", "scale a member enters with", 1.08, 0.5, 2.0),
    knob("reveal.enter_duration", "enter tween length, seconds", 0.9, 0.0, 5.0),
    knob("reveal.backdrop_duration", "active-to-backdrop tween length, seconds", 0.6, 0.0, 5.0),
    knob("reveal.backdrop_opacity", "resting opacity of a backdrop batch", 0.35, 0.05, 1.0),
    knob("reveal.gone_duration", "backdrop-to-gone tween length, seconds", 0.5, 0.0, 5.0),
    knob("reveal.phase_interval", "autoplay interval between phases, seconds", 4.0, 0.5, 30.0),
    knob("slots.float_amplitude", "idle float displacement of sparkle slots, px", 6.0, 0.0, 40.0),
    knob("slots.parallax", "pointer parallax displacement at depth 1, px", 24.0, 0.0, 120.0),
    knob("slots.float_period", "idle float period, seconds", 5.0, 0.5, 30.0),
    knob("media.haptics", "haptic tick on committed phase changes (0 = off)", 1.0, 0.0, 1.0),
    knob("media.tick_frequency", "haptic tick pitch, Hz", 1400.0, 100.0, 8000.0),
    knob("media.tick_duration", "haptic tick length, seconds", 0.03, 0.005, 0.25),
    knob("media.tick_gain", "haptic tick peak amplitude", 0.08, 0.0, 1.0),
];

/// Whether the viewer asked the platform for reduced motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MotionPreference {
    #[default]
    Full,
    Reduced,
}

impl MotionPreference {
    pub fn is_reduced(self) -> bool {
        self == Self::Reduced
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct KnobSet {
    values: BTreeMap<&'static str, f64>,
}

impl Default for KnobSet {
    fn default() -> Self {
        Self {
            values: KNOB_DEFS.iter().map(|d| (d.key, d.default)).collect(),
        }
    }
}

impl KnobSet {
    pub fn def(key: &str) -> Option<&'static KnobDef> {
        KNOB_DEFS.iter().find(|d| d.key == key)
    }

    pub fn get(&self, key: &str) -> EmberResult<f64> {
        self.values
            .get(key)
            .copied()
            .ok_or_else(|| EmberError::config(format!("unknown knob '{key}'")))
    }

    /// Set `key`, clamped into its range. Returns the stored value.
    pub fn set(&mut self, key: &str, value: f64) -> EmberResult<f64> {
        let def = Self::def(key).ok_or_else(|| EmberError::config(format!("unknown knob '{key}'")))?;
        if !value.is_finite() {
            return Err(EmberError::config(format!("knob '{key}' must be finite")));
        }
        let v = value.clamp(def.min, def.max);
        if v != value {
            tracing::debug!(key, requested = value, stored = v, "knob clamped");
        }
        self.values.insert(def.key, v);
        Ok(v)
    }

    pub fn reset(&mut self, key: &str) -> EmberResult<()> {
        let def = Self::def(key).ok_or_else(|| EmberError::config(format!("unknown knob '{key}'")))?;
        self.values.insert(def.key, def.default);
        Ok(())
    }

    /// Apply a JSON object of `{ "key": number }` overrides.
    pub fn apply_json(&mut self, json: &str) -> EmberResult<()> {
        let overrides: BTreeMap<String, f64> = serde_json::from_str(json)?;
        for (key, value) in overrides {
            self.set(&key, value)?;
        }
        Ok(())
    }

    /// Apply `EMBERLINE_*` overrides from `vars`. Unrelated variables are ignored; unknown
    /// `EMBERLINE_*` keys and unparsable values are errors.
    pub fn apply_env<I>(&mut self, vars: I) -> EmberResult<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, raw) in vars {
            let Some(rest) = name.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let def = KNOB_DEFS
                .iter()
                .find(|d| env_name(d.key) == rest)
                .ok_or_else(|| EmberError::config(format!("unknown knob variable '{name}'")))?;
            let value = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| EmberError::config(format!("'{name}' is not a number: '{raw}'")))?;
            self.set(def.key, value)?;
        }
        Ok(())
    }

    /// Defaults with process environment overrides applied.
    pub fn from_process_env() -> EmberResult<Self> {
        let mut knobs = Self::default();
        knobs.apply_env(std::env::vars())?;
        Ok(knobs)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static KnobDef, f64)> + '_ {
        KNOB_DEFS
            .iter()
            .map(|d| (d, self.values.get(d.key).copied().unwrap_or(d.default)))
    }

    fn value(&self, key: &'static str) -> f64 {
        self.values
            .get(key)
            .copied()
            .or_else(|| Self::def(key).map(|d| d.default))
            .unwrap_or(0.0)
    }
}

fn env_name(key: &str) -> String {
    key.replace('.', "_").to_ascii_uppercase()
}

/// One stroke-like glow pass drawn over the burn edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowPass {
    /// Half-width of the band, px.
    pub half_width: f32,
    pub opacity: f32,
    /// Gaussian blur radius applied to the band, px.
    pub blur_radius: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BurnTuning {
    pub glow_width: f32,
    pub edge_amplitude: f32,
    pub edge_step: u32,
    pub scorch_brightness: f32,
    pub scorch_depth: f32,
    pub time_step: f32,
    /// Widest first, each narrower, brighter and less blurred than the last.
    pub glow_passes: Vec<GlowPass>,
    pub noise: NoiseParams,
}

impl BurnTuning {
    pub fn from_knobs(knobs: &KnobSet, motion: MotionPreference) -> Self {
        let glow_width = knobs.value("burn.glow_width") as f32;
        let bloom = knobs.value("burn.bloom_intensity") as f32;
        let reduced = motion.is_reduced();

        let glow_passes = if reduced || glow_width <= 0.0 {
            Vec::new()
        } else {
            [(2.0, 0.18, 0.8), (1.0, 0.35, 0.4), (0.35, 0.7, 0.15), (0.1, 1.0, 0.0)]
                .into_iter()
                .map(|(w, o, b): (f32, f32, f32)| GlowPass {
                    half_width: (glow_width * w).max(0.5),
                    opacity: (o * bloom).min(1.0),
                    blur_radius: (glow_width * b).round() as u32,
                })
                .collect()
        };

        Self {
            glow_width,
            edge_amplitude: if reduced {
                0.0
            } else {
                knobs.value("burn.edge_amplitude") as f32
            },
            edge_step: knobs.value("burn.edge_step").round() as u32,
            scorch_brightness: knobs.value("burn.scorch_brightness") as f32,
            scorch_depth: knobs.value("burn.scorch_depth") as f32,
            time_step: knobs.value("burn.time_step") as f32,
            glow_passes,
            noise: NoiseParams {
                octaves: knobs.value("noise.octaves").round() as u32,
                x_scale: knobs.value("noise.scale") as f32,
                x_drift: knobs.value("noise.drift") as f32,
                y_drift: knobs.value("noise.flicker") as f32,
                y_skew: knobs.value("noise.skew") as f32,
                seed: 0,
            },
        }
    }
}

impl Default for BurnTuning {
    fn default() -> Self {
        Self::from_knobs(&KnobSet::default(), MotionPreference::Full)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealTuning {
    pub stagger: f64,
    pub blur_start: f64,
    pub scale_start: f64,
    pub enter_duration: f64,
    pub backdrop_duration: f64,
    pub backdrop_opacity: f64,
    pub gone_duration: f64,
    pub phase_interval: f64,
}

impl RevealTuning {
    pub fn from_knobs(knobs: &KnobSet, motion: MotionPreference) -> Self {
        let reduced = motion.is_reduced();
        let dur = |key: &'static str| if reduced { 0.0 } else { knobs.value(key) };
        Self {
            stagger: dur("reveal.stagger"),
            blur_start: if reduced {
                0.0
            } else {
                knobs.value("reveal.blur_start")
            },
            scale_start: if reduced {
                1.0
            } else {
                knobs.value("reveal.scale_start")
            },
            enter_duration: dur("reveal.enter_duration"),
            backdrop_duration: dur("reveal.backdrop_duration"),
            backdrop_opacity: knobs.value("reveal.backdrop_opacity"),
            gone_duration: dur("reveal.gone_duration"),
            phase_interval: knobs.value("reveal.phase_interval"),
        }
    }
}

impl Default for RevealTuning {
    fn default() -> Self {
        Self::from_knobs(&KnobSet::default(), MotionPreference::Full)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotTuning {
    pub float_amplitude: f64,
    pub parallax: f64,
    pub float_period: f64,
}

impl SlotTuning {
    pub fn from_knobs(knobs: &KnobSet, motion: MotionPreference) -> Self {
        let reduced = motion.is_reduced();
        Self {
            float_amplitude: if reduced {
                0.0
            } else {
                knobs.value("slots.float_amplitude")
            },
            parallax: if reduced {
                0.0
            } else {
                knobs.value("slots.parallax")
            },
            float_period: knobs.value("slots.float_period"),
        }
    }
}

impl Default for SlotTuning {
    fn default() -> Self {
        Self::from_knobs(&KnobSet::default(), MotionPreference::Full)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MediaTuning {
    pub haptics: bool,
    pub tick_frequency: f64,
    pub tick_duration: f64,
    pub tick_gain: f64,
}

impl MediaTuning {
    pub fn from_knobs(knobs: &KnobSet) -> Self {
        Self {
            haptics: knobs.value("media.haptics") >= 0.5,
            tick_frequency: knobs.value("media.tick_frequency"),
            tick_duration: knobs.value("media.tick_duration"),
            tick_gain: knobs.value("media.tick_gain"),
        }
    }
}

impl Default for MediaTuning {
    fn default() -> Self {
        Self::from_knobs(&KnobSet::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/knobs.rs"]
mod tests;
