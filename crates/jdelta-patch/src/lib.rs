//! Patch engine for jdelta.
//!
//! Applies a [`Delta`] produced by the diff engine (or by any other
//! implementation of the same wire format) to the document it was computed
//! against, reconstructing the new document exactly.
//!
//! A delta that could not have been produced for the given document is
//! reported as [`PatchError::StructuralMismatch`] with the JSON Pointer of
//! the offending position, rather than being applied on a best-effort basis.
//!
//! # Key Types
//!
//! - [`Patcher`] — Configured patch engine
//! - [`PatchConfig`] — Depth limit and old-value verification
//! - [`PatchError`] / [`PatchResult`] — Failure kinds
//!
//! ```rust
//! use jdelta_types::Delta;
//! use serde_json::json;
//!
//! let delta = Delta::from_value(&json!({"test": {"_0": [1, 0, 0], "_t": "a"}})).unwrap();
//! let patched = jdelta_patch::patch(&json!({"test": [1, 2, 3]}), &delta).unwrap();
//! assert_eq!(patched, json!({"test": [2, 3]}));
//! ```

mod array_patch;
pub mod config;
pub mod error;
pub mod value_patch;

pub use config::PatchConfig;
pub use error::{PatchError, PatchResult};
pub use value_patch::{patch, Patcher};

pub use jdelta_types::Delta;
