//! Array diff: correlate elements by value, then shrink the result.
//!
//! 1. Build value-to-index tables for both arrays.
//! 2. Walk the old table in index order: a value missing from the new array
//!    is removed, a value found at another index is moved, a value found at
//!    the same index needs no entry.
//! 3. Values left in the new table are insertions.
//! 4. Shift-elision (see [`crate::elision`]).
//! 5. Coalescing (see [`crate::coalesce`]).

use serde_json::Value;

use jdelta_types::{ArrayDelta, ArrayKey, ArrayOp, Delta, JsonPath, MAX_ARRAY_LEN};

use crate::coalesce::coalesce;
use crate::elision::elide_moves;
use crate::error::{DiffError, DiffResult};
use crate::positions::PositionTable;
use crate::value_diff::Differ;

pub(crate) fn diff_arrays(
    differ: &Differ,
    old: &[Value],
    new: &[Value],
    depth: usize,
) -> DiffResult<Option<Delta>> {
    for items in [old, new] {
        if items.len() > MAX_ARRAY_LEN {
            return Err(too_long(items));
        }
    }

    let delta = correlate(old, new)?;
    let delta = elide_moves(delta, old.len());
    let delta = coalesce(differ, delta, depth)?;

    Ok((!delta.is_empty()).then_some(Delta::Array(delta)))
}

/// Steps 1-3: removals, moves, and insertions from the value tables.
fn correlate(old: &[Value], new: &[Value]) -> DiffResult<ArrayDelta> {
    let old_positions = PositionTable::build(old);
    let mut new_positions = PositionTable::build(new);
    let mut delta = ArrayDelta::new();

    for (value, from) in old_positions.iter() {
        let key = ArrayKey::source(from).ok_or_else(|| too_long(old))?;
        match new_positions.take(value) {
            None => {
                delta.insert(key, ArrayOp::Removed(value.clone()));
            }
            Some(to) if to == from => {}
            Some(to) => {
                let op = ArrayOp::moved(to).ok_or_else(|| too_long(new))?;
                delta.insert(key, op);
            }
        }
    }

    for (value, to) in new_positions.iter() {
        let key = ArrayKey::slot(to).ok_or_else(|| too_long(new))?;
        delta.insert(key, ArrayOp::Inserted(value.clone()));
    }

    Ok(delta)
}

fn too_long(items: &[Value]) -> DiffError {
    DiffError::ArrayTooLong {
        path: JsonPath::root(),
        len: items.len(),
        max: MAX_ARRAY_LEN,
    }
}
