//! Array deltas: positional operations keyed by old or new index.
//!
//! Array indices are encoded as a single decimal digit, so only arrays of up
//! to [`MAX_ARRAY_LEN`] elements can be described. This is a property of the
//! wire format, shared with every other implementation of it; widening it
//! would produce deltas nobody else can read.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::delta::Delta;
use crate::error::CodecError;
use crate::path::JsonPath;

/// Longest array the delta format can index.
pub const MAX_ARRAY_LEN: usize = 10;

/// Key of an operation inside an [`ArrayDelta`].
///
/// Keys order exactly like their wire strings compare: every `Slot` key
/// (`"0"` to `"9"`) sorts before every `Source` key (`"_0"` to `"_9"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArrayKey {
    /// A position in the new array (`"3"`). Holds insertions and in-place
    /// nested diffs.
    Slot(u8),
    /// A position in the old array (`"_3"`). Holds removals and moves.
    Source(u8),
}

impl ArrayKey {
    /// A slot key, if `index` is representable.
    pub fn slot(index: usize) -> Option<Self> {
        digit(index).map(Self::Slot)
    }

    /// A source key, if `index` is representable.
    pub fn source(index: usize) -> Option<Self> {
        digit(index).map(Self::Source)
    }

    /// The array index this key refers to.
    pub fn index(self) -> usize {
        match self {
            Self::Slot(i) | Self::Source(i) => usize::from(i),
        }
    }

    /// Returns `true` for a `"_i"` key.
    pub fn is_source(self) -> bool {
        matches!(self, Self::Source(_))
    }
}

fn digit(index: usize) -> Option<u8> {
    if index < MAX_ARRAY_LEN {
        u8::try_from(index).ok()
    } else {
        None
    }
}

impl fmt::Display for ArrayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slot(i) => write!(f, "{i}"),
            Self::Source(i) => write!(f, "_{i}"),
        }
    }
}

impl FromStr for ArrayKey {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (source, digits) = match s.strip_prefix('_') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let index = match digits.as_bytes() {
            [d @ b'0'..=b'9'] => d - b'0',
            _ => {
                return Err(CodecError::InvalidArrayKey {
                    path: JsonPath::root(),
                    key: s.to_string(),
                })
            }
        };
        Ok(if source {
            Self::Source(index)
        } else {
            Self::Slot(index)
        })
    }
}

/// One operation inside an [`ArrayDelta`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayOp {
    /// The old element is gone. Under a `Source` key; wire `[old, 0, 0]`.
    Removed(Value),
    /// The old element moved to the given new index. Under a `Source` key;
    /// wire `["", to, 3]`.
    Moved(u8),
    /// A new element. Under a `Slot` key; wire `[new]`.
    Inserted(Value),
    /// The element at this index changed in place. Under a `Slot` key;
    /// wire form is the nested delta's own encoding.
    Nested(Delta),
}

impl ArrayOp {
    /// A move to `to`, if the target index is representable.
    pub fn moved(to: usize) -> Option<Self> {
        digit(to).map(Self::Moved)
    }

    /// Short name of the operation, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Removed(_) => "removal",
            Self::Moved(_) => "move",
            Self::Inserted(_) => "insertion",
            Self::Nested(_) => "nested diff",
        }
    }

    /// Returns `true` if this operation may appear under `key`.
    pub fn fits(&self, key: ArrayKey) -> bool {
        match self {
            Self::Removed(_) | Self::Moved(_) => key.is_source(),
            Self::Inserted(_) | Self::Nested(_) => !key.is_source(),
        }
    }
}

/// The positional changes of an array, ordered by [`ArrayKey`].
///
/// The `"_t": "a"` marker that tags an array delta on the wire is not stored;
/// the codec always writes it and requires it on read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArrayDelta {
    ops: BTreeMap<ArrayKey, ArrayOp>,
}

impl ArrayDelta {
    /// Create an empty array delta.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Add an operation, returning the one it replaced.
    ///
    /// The key/operation pairing is not checked here; the codec rejects
    /// mismatched pairs on read and [`layout`](Self::layout) rejects them
    /// before a patch.
    pub fn insert(&mut self, key: ArrayKey, op: ArrayOp) -> Option<ArrayOp> {
        self.ops.insert(key, op)
    }

    /// Remove the operation under `key`.
    pub fn remove(&mut self, key: &ArrayKey) -> Option<ArrayOp> {
        self.ops.remove(key)
    }

    /// The operation under `key`.
    pub fn get(&self, key: &ArrayKey) -> Option<&ArrayOp> {
        self.ops.get(key)
    }

    /// Operations in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ArrayKey, &ArrayOp)> + '_ {
        self.ops.iter().map(|(key, op)| (*key, op))
    }

    /// Number of removals.
    pub fn removals(&self) -> usize {
        self.count(|op| matches!(op, ArrayOp::Removed(_)))
    }

    /// Number of insertions.
    pub fn insertions(&self) -> usize {
        self.count(|op| matches!(op, ArrayOp::Inserted(_)))
    }

    /// Number of moves.
    pub fn moves(&self) -> usize {
        self.count(|op| matches!(op, ArrayOp::Moved(_)))
    }

    fn count(&self, pred: impl Fn(&ArrayOp) -> bool) -> usize {
        self.ops.values().filter(|op| pred(op)).count()
    }
}

impl IntoIterator for ArrayDelta {
    type Item = (ArrayKey, ArrayOp);
    type IntoIter = btree_map::IntoIter<ArrayKey, ArrayOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl FromIterator<(ArrayKey, ArrayOp)> for ArrayDelta {
    fn from_iter<I: IntoIterator<Item = (ArrayKey, ArrayOp)>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl Extend<(ArrayKey, ArrayOp)> for ArrayDelta {
    fn extend<I: IntoIterator<Item = (ArrayKey, ArrayOp)>>(&mut self, iter: I) {
        self.ops.extend(iter);
    }
}
