//! Property tests over generated documents.

use proptest::prelude::*;
use proptest::sample::subsequence;
use serde_json::{json, Value};

use crate::{diff, patch, ArrayOp, Delta, MAX_ARRAY_LEN};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

/// Distinct values that arrays are drawn from.
fn element_pool() -> Vec<Value> {
    vec![
        json!(0),
        json!(1),
        json!(2),
        json!(true),
        json!(null),
        json!("a"),
        json!("b"),
        json!([1, 2]),
        json!([]),
        json!({"id": 1, "v": 1}),
        json!({"id": 1, "v": 2}),
        json!({"id": 2, "v": 1}),
        json!({"id": 3}),
        json!({}),
    ]
}

/// Arrays without repeated values, at most [`MAX_ARRAY_LEN`] long.
fn unique_array() -> impl Strategy<Value = Value> {
    subsequence(element_pool(), 0..=MAX_ARRAY_LEN)
        .prop_shuffle()
        .prop_map(Value::Array)
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-3i64..3).prop_map(Value::from),
        "[a-c]{0,2}".prop_map(Value::from),
    ]
}

fn member() -> impl Strategy<Value = Value> {
    prop_oneof![scalar(), unique_array()].prop_recursive(3, 24, 4, |inner| {
        prop::collection::btree_map("[a-d]", inner, 0..4)
            .prop_map(|m| Value::Object(m.into_iter().collect()))
    })
}

fn document() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-e]", member(), 0..5)
        .prop_map(|m| Value::Object(m.into_iter().collect()))
}

/// Every nested entry carries a change and every array key is in range.
fn well_formed(delta: &Delta, top: bool) -> bool {
    match delta {
        Delta::Object(entries) => {
            (top || !entries.is_empty()) && entries.values().all(|d| well_formed(d, false))
        }
        Delta::Array(array) => {
            !array.is_empty()
                && array.iter().all(|(key, op)| {
                    key.index() < MAX_ARRAY_LEN
                        && op.fits(key)
                        && match op {
                            ArrayOp::Nested(nested) => well_formed(nested, false),
                            _ => true,
                        }
                })
        }
        Delta::Modified { old, new } => old != new,
        Delta::Added(_) | Delta::Removed(_) => true,
    }
}

/// Wire keys of every array delta: `_t`, a digit, or `_` plus a digit.
fn wire_keys_valid(value: &Value) -> bool {
    match value {
        Value::Object(map) if map.get("_t") == Some(&json!("a")) => map.iter().all(|(k, v)| {
            let shaped = match k.as_bytes() {
                b"_t" => true,
                [d] | [b'_', d] => d.is_ascii_digit(),
                _ => false,
            };
            shaped && wire_keys_valid(v)
        }),
        Value::Object(map) => map.values().all(wire_keys_valid),
        Value::Array(items) => items.iter().all(wire_keys_valid),
        _ => true,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn patch_reverses_diff(old in document(), new in document()) {
        init_tracing();
        let delta = diff(&old, &new).unwrap();
        prop_assert_eq!(patch(&old, &delta).unwrap(), new);
    }

    #[test]
    fn self_diff_is_empty(doc in document()) {
        prop_assert!(diff(&doc, &doc).unwrap().is_empty());
    }

    #[test]
    fn deltas_are_well_formed(old in document(), new in document()) {
        let delta = diff(&old, &new).unwrap();
        prop_assert!(well_formed(&delta, true));
        prop_assert!(wire_keys_valid(&delta.to_value()));
    }

    #[test]
    fn wire_form_round_trips(old in document(), new in document()) {
        let delta = diff(&old, &new).unwrap();
        prop_assert_eq!(Delta::from_value(&delta.to_value()).unwrap(), delta);
    }

    #[test]
    fn repeated_values_never_panic(
        old in prop::collection::vec(0i64..3, 0..=MAX_ARRAY_LEN),
        new in prop::collection::vec(0i64..3, 0..=MAX_ARRAY_LEN),
    ) {
        let old = json!({"list": old});
        let new = json!({"list": new});
        let delta = diff(&old, &new).unwrap();
        match patch(&old, &delta) {
            Ok(_) => {}
            Err(err) => prop_assert!(err.is_structural_mismatch(), "unexpected error: {}", err),
        }
    }
}

#[test]
fn repeated_values_can_diverge() {
    let old = json!({"list": [1, 1]});
    let new = json!({"list": [1]});
    let delta = diff(&old, &new).unwrap();
    assert_eq!(delta.to_value(), json!({"list": {"_1": ["", 0, 3], "_t": "a"}}));
    assert_eq!(patch(&old, &delta).unwrap(), json!({"list": [1, 1]}));
}
