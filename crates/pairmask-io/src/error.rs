//! Error types for dataset I/O.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Image could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Image could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// The two images of a pair differ in size.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Size of the base image.
        expected: String,
        /// Size of the ref image.
        actual: String,
    },

    /// A required dataset directory does not exist.
    #[error("missing directory: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// One side of a pair is gone from disk.
    #[error("missing pair file: {0}")]
    MissingPair(String),

    /// Writing a committed pair failed; partial output was removed.
    #[error("commit failed at {}: {source}", path.display())]
    Commit {
        /// File being written when the failure happened.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: Box<IoError>,
    },

    /// Decoded bytes violated a buffer contract.
    #[error(transparent)]
    Core(#[from] pairmask_core::Error),
}

impl IoError {
    /// Creates an [`IoError::DimensionMismatch`] from two sizes.
    pub fn dimension_mismatch(expected: (u32, u32), actual: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            expected: format!("{}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }

    /// Returns `true` if this error means the current pair should be skipped.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. } | Self::MissingPair(_) | Self::Decode(_)
        )
    }
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
