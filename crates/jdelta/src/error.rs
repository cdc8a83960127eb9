use thiserror::Error;

use jdelta_diff::DiffError;
use jdelta_patch::PatchError;
use jdelta_types::CodecError;

#[derive(Debug, Error)]
pub enum DeltaError {
    #[error("diff error: {0}")]
    Diff(#[from] DiffError),

    #[error("patch error: {0}")]
    Patch(#[from] PatchError),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("config error: {0}")]
    Config(String),
}

impl DeltaError {
    /// The caller passed a value of the wrong kind at the top level.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::Diff(DiffError::InvalidArgumentKind { .. })
                | Self::Patch(PatchError::InvalidArgumentKind { .. })
        )
    }

    /// The delta does not fit the document, or is not a well-formed delta.
    pub fn is_structural_mismatch(&self) -> bool {
        matches!(
            self,
            Self::Patch(PatchError::StructuralMismatch { .. }) | Self::Codec(_)
        )
    }
}

pub type DeltaResult<T> = Result<T, DeltaError>;
