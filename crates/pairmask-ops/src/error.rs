//! Error types for mask and image operations.

use thiserror::Error;

/// Error type for mask and image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Buffer contract violation from the pixel core.
    #[error(transparent)]
    Core(#[from] pairmask_core::Error),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl OpsError {
    /// Returns `true` if the inputs had different dimensions.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(
            self,
            Self::Core(pairmask_core::Error::DimensionMismatch { .. })
        )
    }
}

/// Result type for mask and image operations.
pub type OpsResult<T> = Result<T, OpsError>;
