//! Foundation types for jdelta.
//!
//! This crate defines the delta data model shared by the diff and patch
//! engines, and owns its wire encoding. The encoding is the one used by the
//! common JavaScript diff/patch convention, so a delta produced here can be
//! applied by any other implementation of that convention and vice versa.
//!
//! # Key Types
//!
//! - [`Delta`] — Difference at one position: modified, added, removed, or a
//!   nested object/array diff
//! - [`ArrayDelta`] / [`ArrayKey`] / [`ArrayOp`] — Positional operations inside
//!   an array diff
//! - [`SlotLayout`] — Where every element of a patched array comes from
//! - [`JsonPath`] — JSON Pointer locating an error inside a document
//!
//! # Wire Encoding
//!
//! | Delta | Encoding |
//! |---|---|
//! | modified | `[old, new]` |
//! | added | `[new]` |
//! | removed | `[old, 0, 0]` |
//! | array move | `["", to, 3]` under `"_<from>"` |
//! | array diff | object with `"_t": "a"` plus positional entries |

pub mod array;
pub mod codec;
pub mod delta;
pub mod error;
pub mod layout;
pub mod path;
pub mod value;

pub use array::{ArrayDelta, ArrayKey, ArrayOp, MAX_ARRAY_LEN};
pub use delta::Delta;
pub use error::{CodecError, CodecResult, LayoutError};
pub use layout::{SlotLayout, SlotSource};
pub use path::JsonPath;
pub use value::kind_name;
