/// Convenience result type used across emberline.
pub type EmberResult<T> = Result<T, EmberError>;

/// Top-level error taxonomy for fallible setup paths.
///
/// Per-frame hot paths (progress mapping, noise, phase lookup, media gating) are total and do not
/// produce these.
#[derive(thiserror::Error, Debug)]
pub enum EmberError {
    /// Invalid section description, threshold table or parameter.
    #[error("validation error: {0}")]
    Validation(String),

    /// Compositor failures (buffer size mismatch, unusable dimensions).
    #[error("render error: {0}")]
    Render(String),

    /// Media bookkeeping failures that are not playback-policy rejections.
    #[error("media error: {0}")]
    Media(String),

    /// Unknown or malformed tuning knobs.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EmberError {
    /// Build a [`EmberError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`EmberError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`EmberError::Media`] value.
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`EmberError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`EmberError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for EmberError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
