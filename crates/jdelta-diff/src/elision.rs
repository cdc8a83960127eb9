//! Shift-elision: drop moves that removals and insertions already imply.
//!
//! Entries are folded in ascending index order, a slot entry before the
//! source entry of the same index, carrying a running `shift`: each removal
//! adds one, each insertion subtracts one. A move `_i -> to` with
//! `i - to == shift` is exactly the displacement the surrounding removals
//! and insertions cause, so it is a candidate for elision.
//!
//! A candidate is only dropped if the patch side can reproduce it: an
//! element without an entry is carried into the free slots of the patched
//! array in its original relative order (see [`jdelta_types::layout`]).
//! When a move crosses another recorded move, the shift rule alone is not
//! enough; such candidates are restored one at a time until the layout puts
//! every elided element exactly where it belongs.

use std::collections::BTreeMap;

use tracing::trace;

use jdelta_types::{ArrayDelta, ArrayKey, ArrayOp, SlotSource};

pub(crate) fn elide_moves(mut delta: ArrayDelta, old_len: usize) -> ArrayDelta {
    let mut elided = shift_candidates(&delta);

    while let Some(from) = first_misplaced(&delta, &elided, old_len) {
        trace!(from, "move restored: not reproducible by carried placement");
        elided.remove(&from);
    }

    for (&from, &to) in &elided {
        trace!(from, to, "move elided");
        delta.remove(&ArrayKey::Source(from));
    }
    delta
}

/// The running-shift fold. Returns `from -> to` for every elidable move.
fn shift_candidates(delta: &ArrayDelta) -> BTreeMap<u8, u8> {
    let mut ordered: Vec<(ArrayKey, &ArrayOp)> = delta.iter().collect();
    ordered.sort_by_key(|&(key, _)| (key.index(), key.is_source()));

    let (_, elided) = ordered.into_iter().fold(
        (0i32, BTreeMap::new()),
        |(shift, mut elided), (key, op)| match op {
            ArrayOp::Removed(_) => (shift + 1, elided),
            ArrayOp::Inserted(_) => (shift - 1, elided),
            ArrayOp::Moved(to) => {
                if let ArrayKey::Source(from) = key {
                    if i32::from(from) - i32::from(*to) == shift {
                        elided.insert(from, *to);
                    }
                }
                (shift, elided)
            }
            ArrayOp::Nested(_) => (shift, elided),
        },
    );
    elided
}

/// Lay the delta out without the elided moves and return the first elided
/// element that would not land on its target.
fn first_misplaced(delta: &ArrayDelta, elided: &BTreeMap<u8, u8>, old_len: usize) -> Option<u8> {
    if elided.is_empty() {
        return None;
    }

    let trial: ArrayDelta = delta
        .iter()
        .filter(|(key, _)| !matches!(key, ArrayKey::Source(from) if elided.contains_key(from)))
        .map(|(key, op)| (key, op.clone()))
        .collect();

    let layout = match trial.layout(old_len) {
        Ok(layout) => layout,
        // Not reachable for correlated deltas; keep every move if it happens.
        Err(_) => return elided.keys().next().copied(),
    };

    layout
        .slots()
        .iter()
        .enumerate()
        .find_map(|(slot, source)| match source {
            SlotSource::Carried(from) => {
                let from = u8::try_from(*from).ok()?;
                let to = elided.get(&from)?;
                (usize::from(*to) != slot).then_some(from)
            }
            _ => None,
        })
}
