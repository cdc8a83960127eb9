//! Array patch: build the new array from its slot layout.

use serde_json::Value;
use tracing::trace;

use jdelta_types::{ArrayDelta, ArrayOp, SlotSource};

use crate::error::{PatchError, PatchResult};
use crate::value_patch::Patcher;

pub(crate) fn patch_array(
    patcher: &Patcher,
    old: &[Value],
    delta: &ArrayDelta,
    depth: usize,
) -> PatchResult<Vec<Value>> {
    let layout = delta.layout(old.len())?;

    for (key, op) in delta.iter() {
        if let ArrayOp::Removed(expected) = op {
            let actual = element(old, key.index())?;
            patcher
                .verify(actual, expected)
                .map_err(|e| e.within(key.to_string()))?;
        }
    }

    let mut patched = Vec::with_capacity(layout.slots().len());
    for source in layout.slots() {
        let value = match *source {
            SlotSource::Carried(from) | SlotSource::Moved(from) => element(old, from)?.clone(),
            SlotSource::Inserted(value) => value.clone(),
            SlotSource::Nested { from, key, delta } => patcher
                .patch_value(element(old, from)?, delta, depth + 1)
                .map_err(|e| e.within(key.to_string()))?,
        };
        patched.push(value);
    }

    trace!(
        old_len = old.len(),
        new_len = patched.len(),
        ops = delta.len(),
        "array patched"
    );
    Ok(patched)
}

fn element(old: &[Value], index: usize) -> PatchResult<&Value> {
    old.get(index).ok_or_else(|| {
        PatchError::mismatch(format!(
            "index {index} out of range for array of length {}",
            old.len()
        ))
    })
}
