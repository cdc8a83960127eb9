use serde::{Deserialize, Serialize};

/// Default nesting limit for both engines.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration for the diff engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Deepest nesting level the engine descends into before giving up
    /// with [`DiffError::DepthExceeded`](crate::DiffError::DepthExceeded).
    pub max_depth: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
