//! JSON Pointer paths for error reporting.
//!
//! Errors are raised deep inside a recursive walk and carry the location
//! where they happened. Rather than threading a path down through every call,
//! each level prepends its own segment while the error travels back up (see
//! the `within` methods on the error types).

use std::fmt;

/// An RFC 6901 JSON Pointer, e.g. `/users/_3/name`.
///
/// The root document is displayed as `/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct JsonPath {
    segments: Vec<String>,
}

impl JsonPath {
    /// The pointer to the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns `true` if this points at the document root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The unescaped path segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Prepend an enclosing segment.
    pub fn prepend(&mut self, segment: impl Into<String>) {
        self.segments.insert(0, segment.into());
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment.replace('~', "~0").replace('/', "~1"))?;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for JsonPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}
