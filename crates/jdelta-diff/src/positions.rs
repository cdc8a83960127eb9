//! Value-to-index correspondence tables for array diffing.

use serde_json::Value;

/// Maps each distinct value of an array to the index where it occurs.
///
/// When a value occurs more than once, the last occurrence wins: earlier
/// indices of the same value are forgotten. Arrays with duplicate values are
/// therefore correlated on their last copies only, and the resulting delta
/// is not guaranteed to reproduce them. This is the documented behavior of
/// the format's reference algorithm and is kept as is.
///
/// Arrays are at most ten elements long, so a linear table compared with
/// `Value`'s own equality is both the simplest and the fastest choice.
#[derive(Debug)]
pub(crate) struct PositionTable<'a> {
    entries: Vec<(&'a Value, usize)>,
}

impl<'a> PositionTable<'a> {
    /// Build the table for `items`, ordered by index.
    pub(crate) fn build(items: &'a [Value]) -> Self {
        let mut entries: Vec<(&'a Value, usize)> = Vec::with_capacity(items.len());
        for (index, value) in items.iter().enumerate() {
            match entries.iter_mut().find(|(seen, _)| *seen == value) {
                Some(entry) => entry.1 = index,
                None => entries.push((value, index)),
            }
        }
        entries.sort_by_key(|&(_, index)| index);
        Self { entries }
    }

    /// Remove `value` from the table, returning its index.
    pub(crate) fn take(&mut self, value: &Value) -> Option<usize> {
        let at = self.entries.iter().position(|(seen, _)| *seen == value)?;
        Some(self.entries.remove(at).1)
    }

    /// Entries in ascending index order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&'a Value, usize)> + '_ {
        self.entries.iter().copied()
    }
}
