//! Error types for plainpad.

use thiserror::Error;

/// Result type alias for plainpad operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`], used by the UI to pick a
/// notification style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A search located no match.
    NotFound,
    /// The user dismissed a picker.
    Cancelled,
    /// The storage collaborator reported an I/O or permission error.
    PersistenceFailed,
    /// A platform capability (e.g. a native file picker) is absent.
    Unavailable,
    /// Configuration could not be parsed or failed validation.
    InvalidConfig,
    /// A user-supplied file name was rejected.
    InvalidName,
}

/// Error type for plainpad operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Find located no match for the needle.
    #[error("no match for {needle:?}")]
    NotFound { needle: String },
    /// A host picker was aborted. Gateways turn this into a `Cancelled`
    /// outcome, so it never reaches the session as an error.
    #[error("operation cancelled")]
    Cancelled,
    /// Storage failure while performing `op`.
    #[error("could not {op} file: {reason}")]
    PersistenceFailed { op: &'static str, reason: String },
    /// Platform capability is missing.
    #[error("{0} is not available")]
    Unavailable(&'static str),
    /// Bad configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Rejected file name.
    #[error("invalid file name: {0:?}")]
    InvalidName(String),
    /// Malformed JSON in a cache entry or config file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a persistence failure for the given operation.
    pub fn persistence(op: &'static str, reason: impl ToString) -> Self {
        Self::PersistenceFailed {
            op,
            reason: reason.to_string(),
        }
    }

    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::PersistenceFailed { .. } => ErrorKind::PersistenceFailed,
            Self::Unavailable(_) => ErrorKind::Unavailable,
            Self::InvalidConfig(_) | Self::Json(_) => ErrorKind::InvalidConfig,
            Self::InvalidName(_) => ErrorKind::InvalidName,
        }
    }
}
