//! Error types for the diff crate.

use jdelta_types::JsonPath;

/// Errors that can occur during diff operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// A top-level argument was not an object.
    #[error("invalid argument: expected {expected}, got {actual}")]
    InvalidArgumentKind {
        expected: &'static str,
        actual: &'static str,
    },

    /// An array is too long for the single-digit index encoding.
    #[error("array at {path} has {len} elements; deltas index at most {max}")]
    ArrayTooLong {
        path: JsonPath,
        len: usize,
        max: usize,
    },

    /// The documents nest deeper than the configured limit.
    #[error("nesting depth exceeds the limit of {limit}")]
    DepthExceeded { limit: usize },
}

impl DiffError {
    /// Re-anchor this error one level down, under `segment`.
    pub fn within(mut self, segment: impl Into<String>) -> Self {
        if let Self::ArrayTooLong { path, .. } = &mut self {
            path.prepend(segment);
        }
        self
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
