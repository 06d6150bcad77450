//! Errors surfaced by the grading core.

/// Errors that abort a grading call. No partial result is ever returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GradeError {
    /// A parameter is non-numeric, non-finite, or drives its formula
    /// outside the range where it is defined.
    #[error("invalid value for `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The adjustment mapping (or a nested HSL mapping) has the wrong shape.
    #[error("malformed adjustments: {0}")]
    MalformedAdjustments(String),

    /// Pixel data does not match the declared RGBA dimensions.
    #[error("pixel buffer holds {actual} bytes, expected {expected} for a {width}x{height} image")]
    DimensionMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

impl GradeError {
    pub(crate) fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
