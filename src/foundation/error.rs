/// Convenience result type used across facewarp.
pub type FacewarpResult<T> = Result<T, FacewarpError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Degenerate facial geometry is deliberately absent: strategies skip such regions instead of
/// failing.
#[derive(thiserror::Error, Debug)]
pub enum FacewarpError {
    /// Invalid caller-provided parameters, landmark arrays or buffers.
    #[error("validation error: {0}")]
    Validation(String),

    /// The capture device could not be opened or permission was denied.
    #[error("acquisition error: {0}")]
    Acquisition(String),

    /// The landmark detector (model or library) is missing or failed to load.
    #[error("detector unavailable: {0}")]
    DetectorUnavailable(String),

    /// A single detection request failed.
    #[error("detection error: {0}")]
    Detection(String),

    /// Errors while drawing into a frame buffer.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FacewarpError {
    /// Build a [`FacewarpError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FacewarpError::Acquisition`] value.
    pub fn acquisition(msg: impl Into<String>) -> Self {
        Self::Acquisition(msg.into())
    }

    /// Build a [`FacewarpError::DetectorUnavailable`] value.
    pub fn detector_unavailable(msg: impl Into<String>) -> Self {
        Self::DetectorUnavailable(msg.into())
    }

    /// Build a [`FacewarpError::Detection`] value.
    pub fn detection(msg: impl Into<String>) -> Self {
        Self::Detection(msg.into())
    }

    /// Build a [`FacewarpError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FacewarpError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error ends the session (acquisition and detector failures).
    pub fn is_session_fatal(&self) -> bool {
        matches!(self, Self::Acquisition(_) | Self::DetectorUnavailable(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
