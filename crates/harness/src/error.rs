//! Error types for the harness
//!
//! Store failures are carried verbatim inside `HarnessError::Store`; the
//! harness adds only the failures it detects itself.

use docfix_core::StoreError;
use thiserror::Error;

/// Result type alias for harness operations
pub type HarnessResult<T> = std::result::Result<T, HarnessError>;

/// Error kinds surfaced to tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Cache lookup miss
    SchemaNotFound,
    /// Failure passed through from the store
    Store,
    /// Pattern produced a payload the store could not parse
    Format,
    /// Harness configuration is unusable
    Config,
}

/// Errors returned by harness operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HarnessError {
    /// No schema was declared under this namespace name
    #[error("Definition of namespace '{0}' not found in cache")]
    SchemaNotFound(String),

    /// Store error, unchanged
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Pattern substitution produced an unparsable payload
    #[error("Pattern produced an unparsable payload {payload:?}: {source}")]
    Format {
        /// Payload after substitution
        payload: String,
        /// Store's parse error
        source: StoreError,
    },

    /// Invalid configuration
    #[error("Invalid harness configuration: {0}")]
    Config(String),
}

impl HarnessError {
    /// Which kind of failure this is
    pub fn kind(&self) -> ErrorKind {
        match self {
            HarnessError::SchemaNotFound(_) => ErrorKind::SchemaNotFound,
            HarnessError::Store(_) => ErrorKind::Store,
            HarnessError::Format { .. } => ErrorKind::Format,
            HarnessError::Config(_) => ErrorKind::Config,
        }
    }

    /// The store error inside, if any
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            HarnessError::Store(e) | HarnessError::Format { source: e, .. } => Some(e),
            _ => None,
        }
    }
}
