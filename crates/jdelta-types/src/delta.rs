//! The [`Delta`] tree.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::array::{ArrayDelta, ArrayOp};

/// The difference between two values at one position of a document.
///
/// Equal values have no delta at all: an unchanged key or array slot is
/// simply absent from the enclosing [`Delta::Object`] or [`ArrayDelta`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delta {
    /// The value was replaced. Wire form `[old, new]`.
    Modified { old: Value, new: Value },
    /// The key exists only in the new document. Wire form `[new]`.
    Added(Value),
    /// The key exists only in the old document. Wire form `[old, 0, 0]`.
    Removed(Value),
    /// Per-key changes of an object. Only changed keys are present.
    Object(BTreeMap<String, Delta>),
    /// Positional changes of an array.
    Array(ArrayDelta),
}

impl Delta {
    /// An object delta with no entries.
    pub fn empty_object() -> Self {
        Self::Object(BTreeMap::new())
    }

    /// Returns `true` for an object or array delta with no entries.
    ///
    /// Leaf deltas are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Object(entries) => entries.is_empty(),
            Self::Array(array) => array.is_empty(),
            Self::Modified { .. } | Self::Added(_) | Self::Removed(_) => false,
        }
    }

    /// The entries of an object delta.
    pub fn as_object(&self) -> Option<&BTreeMap<String, Delta>> {
        match self {
            Self::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// The operations of an array delta.
    pub fn as_array(&self) -> Option<&ArrayDelta> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Short name of the delta kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Modified { .. } => "modified",
            Self::Added(_) => "added",
            Self::Removed(_) => "removed",
            Self::Object(_) => "object delta",
            Self::Array(_) => "array delta",
        }
    }

    /// Number of leaf changes in the whole tree.
    ///
    /// A move or an insertion counts as one change; a nested diff counts
    /// its own leaves.
    pub fn change_count(&self) -> usize {
        match self {
            Self::Modified { .. } | Self::Added(_) | Self::Removed(_) => 1,
            Self::Object(entries) => entries.values().map(Delta::change_count).sum(),
            Self::Array(array) => array
                .iter()
                .map(|(_, op)| match op {
                    ArrayOp::Nested(delta) => delta.change_count(),
                    ArrayOp::Removed(_) | ArrayOp::Moved(_) | ArrayOp::Inserted(_) => 1,
                })
                .sum(),
        }
    }
}

impl From<ArrayDelta> for Delta {
    fn from(array: ArrayDelta) -> Self {
        Self::Array(array)
    }
}

impl From<BTreeMap<String, Delta>> for Delta {
    fn from(entries: BTreeMap<String, Delta>) -> Self {
        Self::Object(entries)
    }
}
