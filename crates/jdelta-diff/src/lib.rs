//! Diff engine for jdelta.
//!
//! Compares two JSON documents and produces a [`Delta`] tree that the patch
//! engine can apply to the old document to reconstruct the new one.
//!
//! Objects are compared key by key. Arrays are correlated by value rather
//! than by position: every element is looked up in the other array, which
//! yields removals, insertions, and moves. Two optimisation passes then
//! shrink the result:
//!
//! - shift-elision drops moves that are implied by the removals and
//!   insertions in front of them;
//! - coalescing turns an object removed and an object inserted at the same
//!   index into one nested diff.
//!
//! # Key Types
//!
//! - [`Differ`] — Configured diff engine
//! - [`DiffConfig`] — Depth limit
//! - [`DiffError`] / [`DiffResult`] — Failure kinds
//!
//! ```rust
//! use serde_json::json;
//!
//! let delta = jdelta_diff::diff(&json!({"test": 1}), &json!({"test": 2})).unwrap();
//! assert_eq!(delta.to_value(), json!({"test": [1, 2]}));
//! ```

mod array_diff;
mod coalesce;
pub mod config;
mod elision;
pub mod error;
mod positions;
pub mod value_diff;

pub use config::DiffConfig;
pub use error::{DiffError, DiffResult};
pub use value_diff::{diff, Differ};

pub use jdelta_types::Delta;
