/// Convenience result type used across geolayer.
pub type GeoLayerResult<T> = Result<T, GeoLayerError>;

/// Top-level error taxonomy used by layer APIs.
///
/// Nothing on the draw path returns these: classification and hit-testing degrade to
/// [`crate::Paint::Unstyled`] / "no match" instead. Errors surface at the configuration and
/// data-binding boundaries only.
#[derive(thiserror::Error, Debug)]
pub enum GeoLayerError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A raw input record could not be turned into a feature.
    #[error("invalid feature at index {index}: {reason}")]
    InvalidFeature {
        /// Position of the offending record in the input sequence.
        index: usize,
        /// Human-readable description of what was wrong.
        reason: String,
    },

    /// Errors while configuring or driving time animation.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GeoLayerError {
    /// Build a [`GeoLayerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GeoLayerError::InvalidFeature`] value.
    pub fn invalid_feature(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidFeature {
            index,
            reason: reason.into(),
        }
    }

    /// Build a [`GeoLayerError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`GeoLayerError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GeoLayerError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
