//! Slot layout: where each element of a patched array comes from.
//!
//! Given an [`ArrayDelta`] and the length of the array it applies to, the
//! patched array has `len - removals + insertions` slots:
//!
//! - a move places old element `i` at its target slot;
//! - an insertion fills its own slot with the new value;
//! - a nested diff under `k` patches old element `k` and fills slot `k`,
//!   or the target slot of `k`'s move when `"_k"` moves it;
//! - a nested diff under `k` whose old element is not moved, but whose slot
//!   `k` is the target of a move from `j`, patches old element `j` instead
//!   (the form where nested diffs are keyed by their new index);
//! - every old element that was neither removed, moved, nor nested is
//!   carried through, and the carried elements fill the remaining slots in
//!   ascending order, keeping their relative order.
//!
//! The last rule is what makes implicit shifts work: an element with no
//! entry of its own slides left past removals and right past insertions
//! without the delta having to say so.

use crate::array::{ArrayDelta, ArrayKey, ArrayOp};
use crate::delta::Delta;
use crate::error::LayoutError;

/// The origin of one slot of a patched array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotSource<'a> {
    /// Old element, unchanged and without an entry of its own.
    Carried(usize),
    /// Old element placed here by a move.
    Moved(usize),
    /// A new value.
    Inserted(&'a serde_json::Value),
    /// Old element `from`, patched by the nested diff under `key`.
    Nested {
        from: usize,
        key: ArrayKey,
        delta: &'a Delta,
    },
}

/// The complete placement plan of an array patch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotLayout<'a> {
    slots: Vec<SlotSource<'a>>,
}

impl<'a> SlotLayout<'a> {
    /// Slot sources in slot order.
    pub fn slots(&self) -> &[SlotSource<'a>] {
        &self.slots
    }
}

impl ArrayDelta {
    /// Plan the patched array for an old array of `old_len` elements.
    ///
    /// Fails if the delta could not have been produced for an array of that
    /// length: indices out of range, two operations claiming one slot or one
    /// old element, or an operation under the wrong key kind.
    pub fn layout(&self, old_len: usize) -> Result<SlotLayout<'_>, LayoutError> {
        let removals = self.removals();
        let len = (old_len + self.insertions())
            .checked_sub(removals)
            .ok_or(LayoutError::TooManyRemovals {
                removals,
                len: old_len,
            })?;

        let mut slots: Vec<Option<SlotSource<'_>>> = vec![None; len];
        let mut consumed = vec![false; old_len];
        // Moves already placed together with a nested diff.
        let mut carried_moves: Vec<u8> = Vec::new();

        // Slot keys sort before source keys, so every nested diff claims its
        // move before the move itself comes up.
        for (key, op) in self.iter() {
            match (key, op) {
                (ArrayKey::Source(from), ArrayOp::Moved(_)) if carried_moves.contains(&from) => {}
                (ArrayKey::Source(_), ArrayOp::Removed(_)) => {
                    consume(&mut consumed, key)?;
                }
                (ArrayKey::Source(_), ArrayOp::Moved(to)) => {
                    let from = consume(&mut consumed, key)?;
                    place(&mut slots, key, usize::from(*to), SlotSource::Moved(from))?;
                }
                (ArrayKey::Slot(_), ArrayOp::Inserted(value)) => {
                    place(&mut slots, key, key.index(), SlotSource::Inserted(value))?;
                }
                (ArrayKey::Slot(at), ArrayOp::Nested(delta)) => {
                    let (origin, slot) = match self.nested_move(at) {
                        Some((from, to)) => {
                            carried_moves.push(from);
                            (ArrayKey::Source(from), to)
                        }
                        None => (key, key.index()),
                    };
                    let from = consume(&mut consumed, origin)?;
                    place(&mut slots, key, slot, SlotSource::Nested { from, key, delta })?;
                }
                (key, op) => {
                    return Err(LayoutError::MisplacedOp {
                        key,
                        op: op.kind_name(),
                    })
                }
            }
        }

        // The counts always agree: free slots = len - placed = carried.
        let mut carried = consumed
            .iter()
            .enumerate()
            .filter(|(_, taken)| !**taken)
            .map(|(index, _)| SlotSource::Carried(index));
        let slots = slots
            .into_iter()
            .map(|slot| slot.or_else(|| carried.next()))
            .collect::<Option<Vec<_>>>()
            .ok_or(LayoutError::TooManyRemovals {
                removals,
                len: old_len,
            })?;

        Ok(SlotLayout { slots })
    }

    /// The move a nested diff under slot `at` travels with, as
    /// `(old index, target slot)`.
    fn nested_move(&self, at: u8) -> Option<(u8, usize)> {
        if let Some(ArrayOp::Moved(to)) = self.get(&ArrayKey::Source(at)) {
            return Some((at, usize::from(*to)));
        }
        self.iter().find_map(|(key, op)| match (key, op) {
            (ArrayKey::Source(from), ArrayOp::Moved(to)) if *to == at => {
                Some((from, usize::from(at)))
            }
            _ => None,
        })
    }
}

fn consume(consumed: &mut [bool], key: ArrayKey) -> Result<usize, LayoutError> {
    let index = key.index();
    match consumed.get_mut(index) {
        None => Err(LayoutError::IndexOutOfRange {
            key,
            index,
            len: consumed.len(),
        }),
        Some(true) => Err(LayoutError::AlreadyConsumed { key, index }),
        Some(taken) => {
            *taken = true;
            Ok(index)
        }
    }
}

fn place<'a>(
    slots: &mut [Option<SlotSource<'a>>],
    key: ArrayKey,
    slot: usize,
    source: SlotSource<'a>,
) -> Result<(), LayoutError> {
    let len = slots.len();
    match slots.get_mut(slot) {
        None => Err(LayoutError::SlotOutOfRange { key, slot, len }),
        Some(Some(_)) => Err(LayoutError::SlotTaken { key, slot }),
        Some(free) => {
            *free = Some(source);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn delta(ops: Vec<(ArrayKey, ArrayOp)>) -> ArrayDelta {
        ops.into_iter().collect()
    }

    #[test]
    fn empty_delta_carries_everything() {
        let delta = ArrayDelta::new();
        let layout = delta.layout(3).unwrap();
        assert_eq!(
            layout.slots(),
            &[
                SlotSource::Carried(0),
                SlotSource::Carried(1),
                SlotSource::Carried(2)
            ]
        );
    }

    #[test]
    fn removal_shifts_carried_elements_left() {
        let d = delta(vec![(ArrayKey::Source(0), ArrayOp::Removed(json!(1)))]);
        let layout = d.layout(3).unwrap();
        assert_eq!(layout.slots(), &[SlotSource::Carried(1), SlotSource::Carried(2)]);
    }

    #[test]
    fn insertion_shifts_carried_elements_right() {
        let new = json!("x");
        let d = delta(vec![(ArrayKey::Slot(1), ArrayOp::Inserted(new.clone()))]);
        let layout = d.layout(2).unwrap();
        assert_eq!(
            layout.slots(),
            &[
                SlotSource::Carried(0),
                SlotSource::Inserted(&new),
                SlotSource::Carried(1)
            ]
        );
    }

    #[test]
    fn moves_take_their_target_slot() {
        // [a, b, c] -> [c, a, b]
        let d = delta(vec![(ArrayKey::Source(2), ArrayOp::Moved(0))]);
        let layout = d.layout(3).unwrap();
        assert_eq!(
            layout.slots(),
            &[
                SlotSource::Moved(2),
                SlotSource::Carried(0),
                SlotSource::Carried(1)
            ]
        );
    }

    #[test]
    fn nested_diff_in_place() {
        let nested = Delta::empty_object();
        let d = delta(vec![(ArrayKey::Slot(1), ArrayOp::Nested(nested.clone()))]);
        let layout = d.layout(2).unwrap();
        assert_eq!(
            layout.slots(),
            &[
                SlotSource::Carried(0),
                SlotSource::Nested {
                    from: 1,
                    key: ArrayKey::Slot(1),
                    delta: &nested
                }
            ]
        );
    }

    #[test]
    fn nested_diff_follows_the_move_of_its_element() {
        // [x, b] -> [b, x']: "_0" moves x to 1, "0" patches it.
        let nested = Delta::empty_object();
        let d = delta(vec![
            (ArrayKey::Slot(0), ArrayOp::Nested(nested.clone())),
            (ArrayKey::Source(0), ArrayOp::Moved(1)),
        ]);
        let layout = d.layout(2).unwrap();
        assert_eq!(
            layout.slots(),
            &[
                SlotSource::Carried(1),
                SlotSource::Nested {
                    from: 0,
                    key: ArrayKey::Slot(0),
                    delta: &nested
                }
            ]
        );
    }

    #[test]
    fn nested_diff_keyed_by_new_index_patches_the_moved_element() {
        // [b, x] -> [x', b]: "_1" moves x to 0, "0" patches it there.
        let nested = Delta::empty_object();
        let d = delta(vec![
            (ArrayKey::Slot(0), ArrayOp::Nested(nested.clone())),
            (ArrayKey::Source(1), ArrayOp::Moved(0)),
        ]);
        let layout = d.layout(2).unwrap();
        assert_eq!(
            layout.slots(),
            &[
                SlotSource::Nested {
                    from: 1,
                    key: ArrayKey::Slot(0),
                    delta: &nested
                },
                SlotSource::Carried(0)
            ]
        );
    }

    #[test]
    fn nested_diff_cannot_share_its_element_with_a_removal() {
        let d = delta(vec![
            (ArrayKey::Slot(0), ArrayOp::Nested(Delta::empty_object())),
            (ArrayKey::Source(0), ArrayOp::Removed(json!(1))),
        ]);
        assert!(matches!(
            d.layout(2),
            Err(LayoutError::AlreadyConsumed { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let d = delta(vec![(ArrayKey::Source(5), ArrayOp::Removed(json!(1)))]);
        assert!(matches!(
            d.layout(2),
            Err(LayoutError::IndexOutOfRange { index: 5, len: 2, .. })
        ));

        let d = delta(vec![(ArrayKey::Slot(4), ArrayOp::Inserted(json!(1)))]);
        assert!(matches!(
            d.layout(1),
            Err(LayoutError::SlotOutOfRange { slot: 4, len: 2, .. })
        ));
    }

    #[test]
    fn rejects_collisions() {
        let d = delta(vec![
            (ArrayKey::Source(1), ArrayOp::Moved(0)),
            (ArrayKey::Slot(0), ArrayOp::Inserted(json!(9))),
        ]);
        assert!(matches!(d.layout(2), Err(LayoutError::SlotTaken { slot: 0, .. })));
    }

    #[test]
    fn rejects_misplaced_ops_and_excess_removals() {
        let d = delta(vec![(ArrayKey::Slot(0), ArrayOp::Moved(1))]);
        assert!(matches!(d.layout(2), Err(LayoutError::MisplacedOp { .. })));

        let d = delta(vec![
            (ArrayKey::Source(0), ArrayOp::Removed(json!(1))),
            (ArrayKey::Source(1), ArrayOp::Removed(json!(2))),
        ]);
        assert!(matches!(
            d.layout(1),
            Err(LayoutError::TooManyRemovals { removals: 2, len: 1 })
        ));
    }
}
