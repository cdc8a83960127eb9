use serde::{Deserialize, Serialize};

use jdelta_diff::DiffConfig;
use jdelta_patch::PatchConfig;

use crate::error::{DeltaError, DeltaResult};

/// Combined configuration for diffing and patching.
///
/// Loads from TOML with one table per engine; missing tables and fields
/// keep their defaults:
///
/// ```toml
/// [diff]
/// max_depth = 64
///
/// [patch]
/// verify_old_values = false
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeltaConfig {
    pub diff: DiffConfig,
    pub patch: PatchConfig,
}

impl DeltaConfig {
    /// Default limits, without old-value verification on patch.
    pub fn lenient() -> Self {
        Self {
            diff: DiffConfig::default(),
            patch: PatchConfig::lenient(),
        }
    }

    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(contents: &str) -> DeltaResult<Self> {
        toml::from_str(contents).map_err(|e| DeltaError::Config(e.to_string()))
    }

    /// Render this configuration as a TOML document.
    pub fn to_toml_string(&self) -> DeltaResult<String> {
        toml::to_string_pretty(self).map_err(|e| DeltaError::Config(e.to_string()))
    }
}
