//! Value-level patch: apply a delta tree top-down.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use jdelta_types::{kind_name, Delta};

use crate::array_patch::patch_array;
use crate::config::PatchConfig;
use crate::error::{PatchError, PatchResult};

/// Apply `delta` to `old` with the default configuration.
///
/// `old` must be an object and `delta` an object delta.
pub fn patch(old: &Value, delta: &Delta) -> PatchResult<Value> {
    Patcher::default().patch(old, delta)
}

/// A configured patch engine.
///
/// Holds no state between calls; one engine can serve any number of
/// concurrent patches.
#[derive(Clone, Debug, Default)]
pub struct Patcher {
    config: PatchConfig,
}

impl Patcher {
    /// Create an engine with the given configuration.
    pub fn new(config: PatchConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &PatchConfig {
        &self.config
    }

    /// Apply `delta` to `old`, returning the new document.
    pub fn patch(&self, old: &Value, delta: &Delta) -> PatchResult<Value> {
        let Value::Object(map) = old else {
            return Err(PatchError::InvalidArgumentKind {
                expected: "object",
                actual: kind_name(old),
            });
        };
        let Delta::Object(entries) = delta else {
            return Err(PatchError::InvalidArgumentKind {
                expected: "object delta",
                actual: delta.kind_name(),
            });
        };

        let patched = self.patch_object(map, entries, 0)?;
        debug!(
            keys = entries.len(),
            changes = delta.change_count(),
            "patch applied"
        );
        Ok(Value::Object(patched))
    }

    /// Replace `old` in place according to `delta`.
    ///
    /// Additions and removals only make sense against a key of the
    /// enclosing object and are rejected here.
    pub(crate) fn patch_value(&self, old: &Value, delta: &Delta, depth: usize) -> PatchResult<Value> {
        if depth > self.config.max_depth {
            return Err(PatchError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }

        match delta {
            Delta::Modified {
                old: expected,
                new,
            } => {
                self.verify(old, expected)?;
                Ok(new.clone())
            }
            Delta::Object(entries) => match old {
                Value::Object(map) => Ok(Value::Object(self.patch_object(map, entries, depth)?)),
                other => Err(PatchError::mismatch(format!(
                    "object delta applied to {}",
                    kind_name(other)
                ))),
            },
            Delta::Array(array) => match old {
                Value::Array(items) => Ok(Value::Array(patch_array(self, items, array, depth)?)),
                other => Err(PatchError::mismatch(format!(
                    "array delta applied to {}",
                    kind_name(other)
                ))),
            },
            Delta::Added(_) | Delta::Removed(_) => Err(PatchError::mismatch(format!(
                "{} delta cannot replace a value in place",
                delta.kind_name()
            ))),
        }
    }

    /// Check that a recorded old value matches the document.
    pub(crate) fn verify(&self, actual: &Value, expected: &Value) -> PatchResult<()> {
        if self.config.verify_old_values && actual != expected {
            return Err(PatchError::mismatch(format!(
                "expected old value {expected}, found {actual}"
            )));
        }
        Ok(())
    }

    fn patch_object(
        &self,
        old: &Map<String, Value>,
        entries: &BTreeMap<String, Delta>,
        depth: usize,
    ) -> PatchResult<Map<String, Value>> {
        let mut patched = old.clone();
        for (key, delta) in entries {
            self.patch_entry(&mut patched, key, delta, depth + 1)
                .map_err(|e| e.within(key.as_str()))?;
        }
        Ok(patched)
    }

    fn patch_entry(
        &self,
        map: &mut Map<String, Value>,
        key: &str,
        delta: &Delta,
        depth: usize,
    ) -> PatchResult<()> {
        match delta {
            Delta::Added(new) => {
                if map.contains_key(key) {
                    return Err(PatchError::mismatch("added key already exists"));
                }
                map.insert(key.to_string(), new.clone());
            }
            Delta::Removed(expected) => {
                let existing = map
                    .remove(key)
                    .ok_or_else(|| PatchError::mismatch("removed key does not exist"))?;
                self.verify(&existing, expected)?;
            }
            _ => {
                let existing = map
                    .get(key)
                    .ok_or_else(|| PatchError::mismatch("changed key does not exist"))?;
                let patched = self.patch_value(existing, delta, depth)?;
                map.insert(key.to_string(), patched);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn delta(wire: Value) -> Delta {
        Delta::from_value(&wire).unwrap()
    }

    // -----------------------------------------------------------------------
    // Object rules
    // -----------------------------------------------------------------------

    #[test]
    fn scalar_change() {
        let out = patch(&json!({"test": 1}), &delta(json!({"test": [1, 2]}))).unwrap();
        assert_eq!(out, json!({"test": 2}));
    }

    #[test]
    fn nested_object_change() {
        let out = patch(
            &json!({"test": {"k": 1, "other": true}}),
            &delta(json!({"test": {"k": [1, 2]}})),
        )
        .unwrap();
        assert_eq!(out, json!({"test": {"k": 2, "other": true}}));
    }

    #[test]
    fn add_remove_and_carry_through() {
        let out = patch(
            &json!({"keep": [1, 2], "gone": 42}),
            &delta(json!({"gone": [42, 0, 0], "fresh": [{"a": 1}]})),
        )
        .unwrap();
        assert_eq!(out, json!({"keep": [1, 2], "fresh": {"a": 1}}));
    }

    #[test]
    fn empty_delta_is_identity() {
        let doc = json!({"a": [1, {"b": 2}], "c": null});
        assert_eq!(patch(&doc, &Delta::empty_object()).unwrap(), doc);
    }

    // -----------------------------------------------------------------------
    // Argument kinds
    // -----------------------------------------------------------------------

    #[test]
    fn rejects_non_object_document() {
        let err = patch(&json!([1, 2]), &Delta::empty_object()).unwrap_err();
        assert_eq!(
            err,
            PatchError::InvalidArgumentKind {
                expected: "object",
                actual: "array"
            }
        );
    }

    #[test]
    fn rejects_non_object_delta() {
        let err = patch(&json!({}), &Delta::Added(json!(1))).unwrap_err();
        assert!(matches!(
            err,
            PatchError::InvalidArgumentKind { expected: "object delta", actual: "added" }
        ));
    }

    // -----------------------------------------------------------------------
    // Structural mismatches
    // -----------------------------------------------------------------------

    fn mismatch_path(err: PatchError) -> String {
        match err {
            PatchError::StructuralMismatch { path, .. } => path.to_string(),
            other => panic!("expected StructuralMismatch, got {:?}", other),
        }
    }

    #[test]
    fn missing_keys_are_mismatches() {
        let err = patch(&json!({}), &delta(json!({"a": [1, 2]}))).unwrap_err();
        assert_eq!(mismatch_path(err), "/a");

        let err = patch(&json!({"a": {}}), &delta(json!({"a": {"b": [1, 0, 0]}}))).unwrap_err();
        assert_eq!(mismatch_path(err), "/a/b");
    }

    #[test]
    fn adding_an_existing_key_is_a_mismatch() {
        let err = patch(&json!({"a": 1}), &delta(json!({"a": [2]}))).unwrap_err();
        assert_eq!(mismatch_path(err), "/a");
    }

    #[test]
    fn kind_mismatches_are_reported() {
        let err = patch(&json!({"a": 1}), &delta(json!({"a": {"b": [1, 2]}}))).unwrap_err();
        assert_eq!(mismatch_path(err), "/a");

        let err = patch(&json!({"a": {}}), &delta(json!({"a": {"_t": "a", "0": [1]}}))).unwrap_err();
        assert_eq!(mismatch_path(err), "/a");
    }

    #[test]
    fn stale_old_values_are_rejected_unless_lenient() {
        let doc = json!({"n": 5, "gone": "x"});
        let d = delta(json!({"n": [1, 2], "gone": ["y", 0, 0]}));

        let err = patch(&doc, &d).unwrap_err();
        assert_eq!(mismatch_path(err), "/gone");

        let lenient = Patcher::new(PatchConfig::lenient());
        assert_eq!(lenient.patch(&doc, &d).unwrap(), json!({"n": 2}));
    }

    #[test]
    fn depth_limit_is_enforced() {
        let mut doc = json!(1);
        let mut wire = json!([1, 2]);
        for _ in 0..6 {
            doc = json!({ "n": doc });
            wire = json!({ "n": wire });
        }
        let d = delta(wire);

        let shallow = Patcher::new(PatchConfig {
            max_depth: 3,
            ..Default::default()
        });
        assert_eq!(
            shallow.patch(&doc, &d).unwrap_err(),
            PatchError::DepthExceeded { limit: 3 }
        );
        assert!(patch(&doc, &d).is_ok());
    }
}
