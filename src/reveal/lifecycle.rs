use crate::config::knobs::RevealTuning;
use crate::progress::ease::Ease;
use crate::progress::map::lerp;

/// Lifecycle of one revealable member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    #[default]
    Future,
    Enter,
    Active,
    Backdrop,
    Gone,
}

impl RevealState {
    fn target(self, tuning: &RevealTuning) -> MemberVisual {
        match self {
            Self::Future => MemberVisual {
                opacity: 0.0,
                blur: tuning.blur_start,
                scale: tuning.scale_start,
            },
            Self::Enter | Self::Active => MemberVisual::REST,
            Self::Backdrop => MemberVisual {
                opacity: tuning.backdrop_opacity,
                ..MemberVisual::REST
            },
            Self::Gone => MemberVisual {
                opacity: 0.0,
                ..MemberVisual::REST
            },
        }
    }

    fn duration(self, tuning: &RevealTuning) -> f64 {
        match self {
            Self::Future | Self::Active => 0.0,
            Self::Enter => tuning.enter_duration,
            Self::Backdrop => tuning.backdrop_duration,
            Self::Gone => tuning.gone_duration,
        }
    }

    fn ease(self) -> Ease {
        match self {
            Self::Enter => Ease::ARRIVE,
            _ => Ease::SETTLE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct MemberVisual {
    pub opacity: f64,
    pub blur: f64,
    pub scale: f64,
}

impl MemberVisual {
    pub const REST: Self = Self {
        opacity: 1.0,
        blur: 0.0,
        scale: 1.0,
    };

    fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self {
            opacity: lerp(a.opacity, b.opacity, t),
            blur: lerp(a.blur, b.blur, t),
            scale: lerp(a.scale, b.scale, t),
        }
    }
}

/// A member's state plus the tween into it.
///
/// Every transition starts from whatever the member looked like at that instant, so
/// interrupting a tween never pops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Member {
    state: RevealState,
    since: f64,
    from: MemberVisual,
}

impl Member {
    pub fn new(tuning: &RevealTuning) -> Self {
        Self {
            state: RevealState::Future,
            since: 0.0,
            from: RevealState::Future.target(tuning),
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Move to `to` at time `now`. Returns `false` if already there.
    pub fn transition(&mut self, to: RevealState, now: f64, tuning: &RevealTuning) -> bool {
        if self.state == to || (to == RevealState::Enter && self.state == RevealState::Active) {
            return false;
        }
        self.from = if to == RevealState::Enter && self.state == RevealState::Future {
            RevealState::Future.target(tuning)
        } else {
            self.visual(now, tuning)
        };
        self.state = to;
        self.since = now;
        true
    }

    /// Settle a finished enter tween into `Active`.
    pub fn settle(&mut self, now: f64, tuning: &RevealTuning) {
        if self.state == RevealState::Enter && self.progress(now, tuning) >= 1.0 {
            self.state = RevealState::Active;
            self.from = MemberVisual::REST;
            self.since = now;
        }
    }

    fn progress(&self, now: f64, tuning: &RevealTuning) -> f64 {
        let d = self.state.duration(tuning);
        if d <= 0.0 {
            return 1.0;
        }
        ((now - self.since) / d).clamp(0.0, 1.0)
    }

    pub fn visual(&self, now: f64, tuning: &RevealTuning) -> MemberVisual {
        let t = self.state.ease().apply(self.progress(now, tuning));
        MemberVisual::lerp(self.from, self.state.target(tuning), t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/lifecycle.rs"]
mod tests;
