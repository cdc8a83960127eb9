//! Error types for the patch crate.

use jdelta_types::{JsonPath, LayoutError};

/// Errors that can occur while applying a delta.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    /// A top-level argument had the wrong kind.
    #[error("invalid argument: expected {expected}, got {actual}")]
    InvalidArgumentKind {
        expected: &'static str,
        actual: &'static str,
    },

    /// The delta does not fit the document it is applied to.
    #[error("delta does not match the document at {path}: {reason}")]
    StructuralMismatch { path: JsonPath, reason: String },

    /// The delta nests deeper than the configured limit.
    #[error("nesting depth exceeds the limit of {limit}")]
    DepthExceeded { limit: usize },
}

impl PatchError {
    /// A mismatch at the current position.
    pub fn mismatch(reason: impl Into<String>) -> Self {
        Self::StructuralMismatch {
            path: JsonPath::root(),
            reason: reason.into(),
        }
    }

    /// Re-anchor this error one level down, under `segment`.
    pub fn within(mut self, segment: impl Into<String>) -> Self {
        if let Self::StructuralMismatch { path, .. } = &mut self {
            path.prepend(segment);
        }
        self
    }
}

impl From<LayoutError> for PatchError {
    fn from(err: LayoutError) -> Self {
        Self::mismatch(err.to_string())
    }
}

/// Convenience alias for patch results.
pub type PatchResult<T> = Result<T, PatchError>;
