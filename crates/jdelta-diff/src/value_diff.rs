//! Value-level diff: dispatch on the kinds of the two values.
//!
//! Equal values produce no delta. Two objects are compared key by key, two
//! arrays go through the array algorithm, and any other pairing (two
//! different scalars, or values of different kinds) is a plain replacement.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use jdelta_types::{kind_name, Delta};

use crate::array_diff::diff_arrays;
use crate::config::DiffConfig;
use crate::error::{DiffError, DiffResult};

/// Diff two documents with the default configuration.
///
/// Both arguments must be objects. The result is always a
/// [`Delta::Object`], empty when the documents are equal.
pub fn diff(old: &Value, new: &Value) -> DiffResult<Delta> {
    Differ::default().diff(old, new)
}

/// A configured diff engine.
///
/// Holds no state between calls; one engine can serve any number of
/// concurrent diffs.
#[derive(Clone, Debug, Default)]
pub struct Differ {
    config: DiffConfig,
}

impl Differ {
    /// Create an engine with the given configuration.
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Diff two documents. Both must be objects.
    pub fn diff(&self, old: &Value, new: &Value) -> DiffResult<Delta> {
        let (old_map, new_map) = match (old, new) {
            (Value::Object(o), Value::Object(n)) => (o, n),
            (Value::Object(_), other) | (other, _) => {
                return Err(DiffError::InvalidArgumentKind {
                    expected: "object",
                    actual: kind_name(other),
                })
            }
        };

        let entries = self.diff_objects(old_map, new_map, 0)?;
        let delta = Delta::Object(entries);
        debug!(
            keys = delta.as_object().map_or(0, BTreeMap::len),
            changes = delta.change_count(),
            "diff computed"
        );
        Ok(delta)
    }

    /// Diff two values at `depth`. `None` means the values are equal.
    pub(crate) fn diff_value(
        &self,
        old: &Value,
        new: &Value,
        depth: usize,
    ) -> DiffResult<Option<Delta>> {
        if depth > self.config.max_depth {
            return Err(DiffError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }
        if old == new {
            return Ok(None);
        }

        match (old, new) {
            (Value::Object(o), Value::Object(n)) => {
                let entries = self.diff_objects(o, n, depth)?;
                Ok((!entries.is_empty()).then_some(Delta::Object(entries)))
            }
            (Value::Array(o), Value::Array(n)) => diff_arrays(self, o, n, depth),
            _ => Ok(Some(Delta::Modified {
                old: old.clone(),
                new: new.clone(),
            })),
        }
    }

    fn diff_objects(
        &self,
        old: &Map<String, Value>,
        new: &Map<String, Value>,
        depth: usize,
    ) -> DiffResult<BTreeMap<String, Delta>> {
        let mut entries = BTreeMap::new();

        // Removed and changed keys.
        for (key, old_val) in old {
            match new.get(key) {
                Some(new_val) => {
                    let nested = self
                        .diff_value(old_val, new_val, depth + 1)
                        .map_err(|e| e.within(key.as_str()))?;
                    if let Some(delta) = nested {
                        entries.insert(key.clone(), delta);
                    }
                }
                None => {
                    entries.insert(key.clone(), Delta::Removed(old_val.clone()));
                }
            }
        }

        // Added keys.
        for (key, new_val) in new {
            if !old.contains_key(key) {
                entries.insert(key.clone(), Delta::Added(new_val.clone()));
            }
        }

        Ok(entries)
    }
}
