/// Easing curves.
///
/// Motion contract: `Out*` curves are for elements arriving on screen, `InOut*` curves are for
/// elements settling or receding. [`Ease::ARRIVE`] and [`Ease::SETTLE`] are the defaults used by
/// the reveal choreography.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    OutQuart,
    InOutQuart,
    OutQuint,
    InOutQuint,
}

impl Ease {
    /// Default curve for entering elements.
    pub const ARRIVE: Self = Self::OutQuart;
    /// Default curve for elements settling into place or fading back.
    pub const SETTLE: Self = Self::InOutQuart;

    pub const ALL: [Self; 11] = [
        Self::Linear,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
        Self::OutQuart,
        Self::InOutQuart,
        Self::OutQuint,
        Self::InOutQuint,
    ];

    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => in_out(t, 2),
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => in_out(t, 3),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => in_out(t, 4),
            Self::OutQuint => 1.0 - (1.0 - t).powi(5),
            Self::InOutQuint => in_out(t, 5),
        }
    }
}

fn in_out(t: f64, power: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(power - 1) * t.powi(power)
    } else {
        1.0 - ((-2.0 * t + 2.0).powi(power) / 2.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/ease.rs"]
mod tests;
