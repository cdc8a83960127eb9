//! Structural diff and patch for JSON documents.
//!
//! `jdelta` computes a compact [`Delta`] between two JSON documents and
//! applies it back to the old document to reconstruct the new one. The
//! delta's wire form is the one used by the jsondiffpatch convention, so
//! deltas can be exchanged with other implementations of it.
//!
//! This crate is the main entry point; it ties together:
//!
//! - [`jdelta_types`] — the delta model and its wire codec
//! - [`jdelta_diff`] — the diff engine
//! - [`jdelta_patch`] — the patch engine
//!
//! ```rust
//! use serde_json::json;
//!
//! let old = json!({"test": [1, 2, 3]});
//! let new = json!({"test": [2, 3]});
//!
//! let delta = jdelta::diff(&old, &new).unwrap();
//! assert_eq!(delta.to_value(), json!({"test": {"_0": [1, 0, 0], "_t": "a"}}));
//! assert_eq!(jdelta::patch(&old, &delta).unwrap(), new);
//! ```
//!
//! # Limits
//!
//! Array deltas index elements with a single digit, so arrays that differ
//! must hold at most [`MAX_ARRAY_LEN`] elements; longer ones fail with
//! [`DiffError::ArrayTooLong`]. Arrays are correlated by value: when an
//! array holds the same value twice, the round trip is not guaranteed.

pub mod config;
pub mod engine;
pub mod error;

#[cfg(test)]
mod properties;

pub use config::DeltaConfig;
pub use engine::DeltaEngine;
pub use error::{DeltaError, DeltaResult};

// Re-export key types
pub use jdelta_diff::{DiffConfig, DiffError, Differ};
pub use jdelta_patch::{PatchConfig, PatchError, Patcher};
pub use jdelta_types::{
    ArrayDelta, ArrayKey, ArrayOp, CodecError, Delta, JsonPath, MAX_ARRAY_LEN,
};

use serde_json::Value;

/// Diff two documents with the default configuration.
pub fn diff(old: &Value, new: &Value) -> DeltaResult<Delta> {
    DeltaEngine::default().diff(old, new)
}

/// Apply a delta with the default configuration.
pub fn patch(old: &Value, delta: &Delta) -> DeltaResult<Value> {
    DeltaEngine::default().patch(old, delta)
}

/// Apply a delta received in its wire form.
pub fn patch_value(old: &Value, wire: &Value) -> DeltaResult<Value> {
    DeltaEngine::default().patch_value(old, wire)
}

pub fn diff_with(config: &DeltaConfig, old: &Value, new: &Value) -> DeltaResult<Delta> {
    Ok(Differ::new(config.diff.clone()).diff(old, new)?)
}

pub fn patch_with(config: &DeltaConfig, old: &Value, delta: &Delta) -> DeltaResult<Value> {
    Ok(Patcher::new(config.patch.clone()).patch(old, delta)?)
}
