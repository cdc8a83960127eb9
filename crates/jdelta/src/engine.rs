use serde_json::Value;
use tracing::debug;

use jdelta_diff::Differ;
use jdelta_patch::Patcher;
use jdelta_types::Delta;

use crate::config::DeltaConfig;
use crate::error::DeltaResult;

/// Diff and patch engines sharing one [`DeltaConfig`].
#[derive(Clone, Debug, Default)]
pub struct DeltaEngine {
    differ: Differ,
    patcher: Patcher,
}

impl DeltaEngine {
    pub fn new(config: DeltaConfig) -> Self {
        Self {
            differ: Differ::new(config.diff),
            patcher: Patcher::new(config.patch),
        }
    }

    /// Build an engine from a TOML configuration document.
    pub fn from_toml_str(contents: &str) -> DeltaResult<Self> {
        Ok(Self::new(DeltaConfig::from_toml_str(contents)?))
    }

    pub fn differ(&self) -> &Differ {
        &self.differ
    }

    pub fn patcher(&self) -> &Patcher {
        &self.patcher
    }

    /// Diff two documents. Both must be objects.
    pub fn diff(&self, old: &Value, new: &Value) -> DeltaResult<Delta> {
        Ok(self.differ.diff(old, new)?)
    }

    /// Apply a delta to the document it was computed against.
    pub fn patch(&self, old: &Value, delta: &Delta) -> DeltaResult<Value> {
        Ok(self.patcher.patch(old, delta)?)
    }

    /// Decode a delta from its wire form, then apply it.
    pub fn patch_value(&self, old: &Value, wire: &Value) -> DeltaResult<Value> {
        let delta = Delta::from_value(wire)?;
        debug!(kind = delta.kind_name(), "wire delta decoded");
        self.patch(old, &delta)
    }
}
