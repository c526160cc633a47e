use thiserror::Error;

/// Convenient result alias for ledstrip_core.
pub type Result<T> = std::result::Result<T, StripError>;

/// The one error type that crosses module boundaries in ledstrip_core.
///
/// A command carrying a label outside the enumerated colour set is rejected
/// here, at the parse boundary, rather than surfacing as a raw lookup
/// failure deep inside the renderer.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum StripError {
    #[error("unknown colour label {label:?}")]
    InvalidColour { label: String },
}

impl StripError {
    pub fn invalid_colour(label: impl Into<String>) -> Self {
        StripError::InvalidColour {
            label: label.into(),
        }
    }
}
