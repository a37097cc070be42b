//! Scroll-windowed playback.
//!
//! Each managed element plays while progress sits inside its half-open window `[start, end)`
//! and is paused outside it. Playback starts unmuted when the host allows it; a rejection is
//! recovered by retrying muted, and the muted state is what the UI mute affordance shows.

use tracing::{debug, warn};

use crate::foundation::core::{Progress, Window};
use crate::foundation::error::EmberResult;
use crate::media::element::MediaElement;

/// Named play window of one media element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MediaWindow {
    pub name: String,
    pub start: f64,
    pub end: f64,
}

impl MediaWindow {
    pub fn window(&self) -> EmberResult<Window> {
        Window::new(self.start, self.end)
    }
}

/// What one `update` did to the element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaEvent {
    Started { muted: bool, fell_back: bool },
    StartFailed,
    Paused { rewound: bool },
    Rewound,
}

pub struct MediaSync<E> {
    name: String,
    window: Window,
    element: E,
    muted: bool,
    user_muted: Option<bool>,
}

impl<E: MediaElement> MediaSync<E> {
    pub fn new(spec: &MediaWindow, element: E) -> EmberResult<Self> {
        Ok(Self {
            name: spec.name.clone(),
            window: spec.window()?,
            element,
            muted: false,
            user_muted: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    /// Muted state to show on the mute affordance.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Direct user toggle. Sticks across later scroll samples.
    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.muted;
        self.user_muted = Some(muted);
        self.muted = muted;
        self.element.set_muted(muted);
        debug!(media = %self.name, muted, "user toggled mute");
        muted
    }

    /// Bring the element in line with progress `p`. Never fails: playback rejections
    /// degrade to muted playback or to staying paused.
    pub fn update(&mut self, p: Progress) -> Option<MediaEvent> {
        if self.window.contains(p) {
            if self.element.is_paused() {
                return Some(self.start());
            }
            return None;
        }

        let rewind = self.window.is_before(p) && self.element.current_time() > 0.0;
        if !self.element.is_paused() {
            self.element.pause();
            if rewind {
                self.element.seek(0.0);
            }
            debug!(media = %self.name, progress = p.get(), rewound = rewind, "media paused");
            return Some(MediaEvent::Paused { rewound: rewind });
        }
        if rewind {
            self.element.seek(0.0);
            debug!(media = %self.name, progress = p.get(), "media rewound");
            return Some(MediaEvent::Rewound);
        }
        None
    }

    fn start(&mut self) -> MediaEvent {
        let want_muted = self.user_muted.unwrap_or(false);
        self.element.seek(0.0);
        self.element.set_muted(want_muted);
        match self.element.play() {
            Ok(()) => {
                self.muted = want_muted;
                debug!(media = %self.name, muted = want_muted, "media started");
                return MediaEvent::Started {
                    muted: want_muted,
                    fell_back: false,
                };
            }
            Err(err) if !want_muted => {
                warn!(media = %self.name, error = %err, "unmuted playback rejected; retrying muted");
            }
            Err(err) => {
                warn!(media = %self.name, error = %err, "muted playback rejected");
                return MediaEvent::StartFailed;
            }
        }

        self.element.set_muted(true);
        match self.element.play() {
            Ok(()) => {
                self.muted = true;
                MediaEvent::Started {
                    muted: true,
                    fell_back: true,
                }
            }
            Err(err) => {
                warn!(media = %self.name, error = %err, "muted playback rejected");
                self.muted = true;
                MediaEvent::StartFailed
            }
        }
    }

    /// Pause without touching the position. Used on section teardown.
    pub fn stop(&mut self) {
        if !self.element.is_paused() {
            self.element.pause();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/sync.rs"]
mod tests;
