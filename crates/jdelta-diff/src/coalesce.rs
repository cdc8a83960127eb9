//! Coalescing: merge an object removed and an object inserted at the same
//! index into one nested diff.
//!
//! Entries are taken in wire key order (all slot keys, then all source
//! keys). The first removal of an object splits them: entries in front of
//! it are candidates, it and everything after it form the pool. A candidate
//! insertion of an object at slot `j` is merged with a pool removal under
//! `_j`, and the pool entry is consumed. Without any removal of an object,
//! the delta is returned untouched.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::trace;

use jdelta_types::{ArrayDelta, ArrayKey, ArrayOp};

use crate::error::DiffResult;
use crate::value_diff::Differ;

pub(crate) fn coalesce(differ: &Differ, delta: ArrayDelta, depth: usize) -> DiffResult<ArrayDelta> {
    let pivot = delta
        .iter()
        .position(|(_, op)| matches!(op, ArrayOp::Removed(old) if old.is_object()));
    let Some(pivot) = pivot else {
        return Ok(delta);
    };

    let mut candidates: Vec<(ArrayKey, ArrayOp)> = delta.into_iter().collect();
    let mut pool: BTreeMap<ArrayKey, ArrayOp> = candidates.split_off(pivot).into_iter().collect();

    let mut merged = ArrayDelta::new();
    for (key, op) in candidates {
        match (key, op) {
            (ArrayKey::Slot(at), ArrayOp::Inserted(new)) if new.is_object() => {
                match take_removed(&mut pool, at) {
                    Some(old) => {
                        trace!(at, "removal and insertion coalesced");
                        let nested = differ
                            .diff_value(&old, &new, depth + 1)
                            .map_err(|e| e.within(key.to_string()))?;
                        if let Some(nested) = nested {
                            merged.insert(key, ArrayOp::Nested(nested));
                        }
                    }
                    None => {
                        merged.insert(key, ArrayOp::Inserted(new));
                    }
                }
            }
            (key, op) => {
                merged.insert(key, op);
            }
        }
    }

    merged.extend(pool);
    Ok(merged)
}

/// Remove and return the value of a removal under `_at`, if the pool has one.
fn take_removed(pool: &mut BTreeMap<ArrayKey, ArrayOp>, at: u8) -> Option<Value> {
    let key = ArrayKey::Source(at);
    if !matches!(pool.get(&key), Some(ArrayOp::Removed(_))) {
        return None;
    }
    match pool.remove(&key) {
        Some(ArrayOp::Removed(old)) => Some(old),
        _ => None,
    }
}
