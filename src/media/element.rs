/// Why a host refused to start playback.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    /// Autoplay policy rejected playback (typically because it was unmuted).
    #[error("playback blocked by autoplay policy")]
    Blocked,
    #[error("playback failed: {0}")]
    Failed(String),
}

/// Host-side media element (video or audio) driven by scroll.
///
/// Implementations wrap whatever the host platform offers; the engine only needs these calls.
pub trait MediaElement {
    fn is_paused(&self) -> bool;

    /// Playback position, seconds.
    fn current_time(&self) -> f64;

    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    fn seek(&mut self, seconds: f64);

    fn set_muted(&mut self, muted: bool);
}

impl<E: MediaElement + ?Sized> MediaElement for Box<E> {
    fn is_paused(&self) -> bool {
        (**self).is_paused()
    }

    fn current_time(&self) -> f64 {
        (**self).current_time()
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn seek(&mut self, seconds: f64) {
        (**self).seek(seconds)
    }

    fn set_muted(&mut self, muted: bool) {
        (**self).set_muted(muted)
    }
}
