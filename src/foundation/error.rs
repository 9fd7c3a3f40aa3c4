/// Convenience result type used across curvease.
pub type CurveResult<T> = Result<T, CurveError>;

/// Why an ease could not be applied to the current host selection.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub enum SelectionIssue {
    /// The host has no active composition to read keyframes from.
    #[error("Please open a composition.")]
    NoComposition,

    /// No property is selected in the host.
    #[error("Please select at least one property.")]
    NoPropertySelected,

    /// Properties are selected, but none of them has two or more selected keyframes.
    #[error("Please select at least two keyframes in the chosen properties.")]
    NoKeyframesSelected,

    /// A single keyframe list handed to the converter was too short.
    #[error("at least two keyframes are required, found {found}")]
    TooFewKeyframes {
        /// Number of keyframes that were supplied.
        found: usize,
    },
}

/// Top-level error taxonomy used by curvease APIs.
#[derive(thiserror::Error, Debug)]
pub enum CurveError {
    /// Curve input text did not split into four comma-separated tokens.
    #[error("parse error: {0}")]
    Parse(String),

    /// One or more curve fields are out of range or not numbers.
    #[error("range error: {}", .0.join("; "))]
    Range(Vec<String>),

    /// The keyframe selection cannot produce any ease.
    #[error("insufficient selection: {0}")]
    InsufficientSelection(SelectionIssue),

    /// The host call failed or returned an unexpected shape.
    #[error("host unavailable: {0}")]
    HostUnavailable(String),

    /// Structurally invalid data (mismatched dimensions, non-finite samples, bad sizes).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing presets and keyframe data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CurveError {
    /// Build a [`CurveError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`CurveError::Range`] value from per-field messages.
    pub fn range(fields: Vec<String>) -> Self {
        Self::Range(fields)
    }

    /// Build a [`CurveError::InsufficientSelection`] value.
    pub fn selection(issue: SelectionIssue) -> Self {
        Self::InsufficientSelection(issue)
    }

    /// Build a [`CurveError::HostUnavailable`] value.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::HostUnavailable(msg.into())
    }

    /// Build a [`CurveError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CurveError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Message suitable for inline display next to the curve input.
    ///
    /// Unlike `Display`, this drops the category prefix so that field errors read the way the
    /// user typed them (`"a must be between 0 and 1; d must be a number"`).
    pub fn user_message(&self) -> String {
        match self {
            Self::Parse(msg) => msg.clone(),
            Self::Range(fields) => fields.join("; "),
            Self::InsufficientSelection(issue) => issue.to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
