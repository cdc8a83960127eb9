//! Wire encoding of [`Delta`] as plain JSON.
//!
//! Encoding is total. Decoding validates shapes and reports the pointer of
//! the first offending entry.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::array::{ArrayDelta, ArrayKey, ArrayOp, MAX_ARRAY_LEN};
use crate::delta::Delta;
use crate::error::{CodecError, CodecResult};
use crate::value::kind_name;

/// Key of the marker entry that tags an object as an array delta.
pub const ARRAY_TAG_KEY: &str = "_t";
/// Value of the array delta marker.
pub const ARRAY_TAG: &str = "a";

const REMOVED_MARKER: u64 = 0;
const MOVED_MARKER: u64 = 3;

impl Delta {
    /// Encode this delta in its wire form.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Modified { old, new } => Value::Array(vec![old.clone(), new.clone()]),
            Self::Added(new) => Value::Array(vec![new.clone()]),
            Self::Removed(old) => removed(old),
            Self::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, delta)| (key.clone(), delta.to_value()))
                    .collect(),
            ),
            Self::Array(array) => array.to_value(),
        }
    }

    /// Decode a delta from its wire form.
    pub fn from_value(value: &Value) -> CodecResult<Self> {
        match value {
            Value::Array(items) => decode_leaf(items),
            Value::Object(map) if is_array_delta(map) => decode_array(map).map(Self::Array),
            Value::Object(map) => {
                let mut entries = BTreeMap::new();
                for (key, entry) in map {
                    let delta = Self::from_value(entry).map_err(|e| e.within(key.as_str()))?;
                    entries.insert(key.clone(), delta);
                }
                Ok(Self::Object(entries))
            }
            other => Err(CodecError::invalid(format!(
                "expected an array or an object, found {}",
                kind_name(other)
            ))),
        }
    }
}

impl ArrayDelta {
    /// Encode this array delta, including the `"_t": "a"` marker.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(ARRAY_TAG_KEY.to_string(), Value::String(ARRAY_TAG.to_string()));
        for (key, op) in self.iter() {
            map.insert(key.to_string(), op.to_value());
        }
        Value::Object(map)
    }
}

impl ArrayOp {
    /// Encode this operation in its wire form.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Removed(old) => removed(old),
            Self::Moved(to) => Value::Array(vec![
                Value::String(String::new()),
                Value::from(*to),
                Value::from(MOVED_MARKER),
            ]),
            Self::Inserted(new) => Value::Array(vec![new.clone()]),
            Self::Nested(delta) => delta.to_value(),
        }
    }
}

fn removed(old: &Value) -> Value {
    Value::Array(vec![
        old.clone(),
        Value::from(REMOVED_MARKER),
        Value::from(REMOVED_MARKER),
    ])
}

fn is_array_delta(map: &Map<String, Value>) -> bool {
    map.get(ARRAY_TAG_KEY).and_then(Value::as_str) == Some(ARRAY_TAG)
}

fn is_marker(value: &Value, marker: u64) -> bool {
    value.as_u64() == Some(marker)
}

fn decode_leaf(items: &[Value]) -> CodecResult<Delta> {
    match items {
        [new] => Ok(Delta::Added(new.clone())),
        [old, new] => Ok(Delta::Modified {
            old: old.clone(),
            new: new.clone(),
        }),
        [old, a, b] if is_marker(a, REMOVED_MARKER) && is_marker(b, REMOVED_MARKER) => {
            Ok(Delta::Removed(old.clone()))
        }
        _ => Err(CodecError::invalid(format!(
            "a {}-element array is not a leaf delta",
            items.len()
        ))),
    }
}

fn decode_array(map: &Map<String, Value>) -> CodecResult<ArrayDelta> {
    let mut array = ArrayDelta::new();
    for (key, value) in map {
        if key == ARRAY_TAG_KEY {
            continue;
        }
        let parsed: ArrayKey = key.parse()?;
        let op = match parsed {
            ArrayKey::Source(_) => decode_source_op(value),
            ArrayKey::Slot(_) => decode_slot_op(value),
        }
        .map_err(|e| e.within(key.as_str()))?;
        array.insert(parsed, op);
    }
    Ok(array)
}

/// Operations under `"_i"`: removal or move.
fn decode_source_op(value: &Value) -> CodecResult<ArrayOp> {
    match value.as_array().map(Vec::as_slice) {
        Some([old, a, b]) if is_marker(a, REMOVED_MARKER) && is_marker(b, REMOVED_MARKER) => {
            Ok(ArrayOp::Removed(old.clone()))
        }
        Some([Value::String(blank), to, marker])
            if blank.is_empty() && is_marker(marker, MOVED_MARKER) =>
        {
            to.as_u64()
                .filter(|&to| to < MAX_ARRAY_LEN as u64)
                .and_then(|to| u8::try_from(to).ok())
                .map(ArrayOp::Moved)
                .ok_or_else(|| CodecError::invalid(format!("move target {to} is not a single digit")))
        }
        _ => Err(CodecError::invalid(
            "expected a removal [old, 0, 0] or a move [\"\", to, 3]",
        )),
    }
}

/// Operations under `"i"`: insertion or in-place nested diff.
fn decode_slot_op(value: &Value) -> CodecResult<ArrayOp> {
    if let Some([new]) = value.as_array().map(Vec::as_slice) {
        return Ok(ArrayOp::Inserted(new.clone()));
    }
    match Delta::from_value(value)? {
        nested @ (Delta::Added(_) | Delta::Removed(_)) => Err(CodecError::invalid(format!(
            "{} cannot be nested in an array slot",
            nested.kind_name()
        ))),
        nested => Ok(ArrayOp::Nested(nested)),
    }
}

impl Serialize for Delta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Delta {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(D::Error::custom)
    }
}
