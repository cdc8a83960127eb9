use serde::{Deserialize, Serialize};

/// Configuration for the patch engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    /// Deepest nesting level the engine descends into before giving up
    /// with [`PatchError::DepthExceeded`](crate::PatchError::DepthExceeded).
    pub max_depth: usize,
    /// When `true`, the old value recorded in a modification or removal must
    /// equal the value being replaced. Turning this off lets a consumer
    /// apply deltas to a copy that drifted in the changed leaves.
    pub verify_old_values: bool,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            max_depth: 128,
            verify_old_values: true,
        }
    }
}

impl PatchConfig {
    /// A configuration that skips old-value verification.
    pub fn lenient() -> Self {
        Self {
            verify_old_values: false,
            ..Default::default()
        }
    }
}
