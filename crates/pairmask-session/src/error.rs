//! Error types for editing sessions.

use pairmask_io::IoError;
use pairmask_ops::OpsError;
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while editing or navigating pairs.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Buffer contract violation.
    #[error(transparent)]
    Core(#[from] pairmask_core::Error),

    /// Pixel operation failure.
    #[error(transparent)]
    Ops(#[from] OpsError),

    /// File-system or codec failure.
    #[error(transparent)]
    Io(#[from] IoError),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid configuration value.
    #[error("invalid config: {0}")]
    Config(String),

    /// The operation needs a loaded pair.
    #[error("no image pair loaded")]
    NoPairLoaded,

    /// No loadable pair is left in the dataset.
    #[error("no loadable image pairs")]
    NoPairs,

    /// A worker thread panicked.
    #[error("worker '{0}' panicked")]
    WorkerPanicked(String),
}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(IoError::Io(e))
    }
}

impl SessionError {
    /// Returns `true` if the pair that caused this error should be skipped.
    pub fn is_skippable(&self) -> bool {
        match self {
            Self::Core(e) => e.is_contract_violation(),
            Self::Ops(e) => e.is_dimension_mismatch(),
            Self::Io(IoError::Io(_)) => true,
            Self::Io(e) => e.is_skippable(),
            _ => false,
        }
    }
}
