//! Error types for the delta model and its wire codec.

use thiserror::Error;

use crate::array::ArrayKey;
use crate::path::JsonPath;

/// Errors produced while decoding a delta from its wire form.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The value at `path` is not a valid delta encoding.
    #[error("invalid delta encoding at {path}: {reason}")]
    InvalidEncoding { path: JsonPath, reason: String },

    /// An array delta key is neither a single digit nor `_` plus a single digit.
    #[error("invalid array delta key {key:?} at {path}")]
    InvalidArrayKey { path: JsonPath, key: String },
}

impl CodecError {
    /// An encoding error at the current position.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            path: JsonPath::root(),
            reason: reason.into(),
        }
    }

    /// Re-anchor this error one level down, under `segment`.
    pub fn within(mut self, segment: impl Into<String>) -> Self {
        match &mut self {
            Self::InvalidEncoding { path, .. } | Self::InvalidArrayKey { path, .. } => {
                path.prepend(segment)
            }
        }
        self
    }

    /// Where in the delta the error was found.
    pub fn path(&self) -> &JsonPath {
        match self {
            Self::InvalidEncoding { path, .. } | Self::InvalidArrayKey { path, .. } => path,
        }
    }
}

/// Convenience alias for codec results.
pub type CodecResult<T> = Result<T, CodecError>;

/// Reasons an [`ArrayDelta`](crate::ArrayDelta) cannot be laid out over an
/// array of a given length.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// An operation refers to an old index the array does not have.
    #[error("{key} refers to index {index}, but the array has {len} elements")]
    IndexOutOfRange { key: ArrayKey, index: usize, len: usize },

    /// An operation places an element past the end of the patched array.
    #[error("{key} targets slot {slot}, but the patched array has {len} elements")]
    SlotOutOfRange { key: ArrayKey, slot: usize, len: usize },

    /// Two operations place an element in the same slot.
    #[error("{key} targets slot {slot}, which is already taken")]
    SlotTaken { key: ArrayKey, slot: usize },

    /// Two operations consume the same old element.
    #[error("{key} consumes old index {index} a second time")]
    AlreadyConsumed { key: ArrayKey, index: usize },

    /// An operation sits under the wrong kind of key.
    #[error("{op} is not valid under key {key}")]
    MisplacedOp { key: ArrayKey, op: &'static str },

    /// More removals than elements.
    #[error("{removals} removals exceed the {len} elements of the array")]
    TooManyRemovals { removals: usize, len: usize },
}
