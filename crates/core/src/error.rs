//! Error types for the backing document store
//!
//! Every failure a store can report is a `StoreError`. The harness never
//! reinterprets these: they travel to the test unchanged so store-level
//! diagnostics stay intact. `StoreError` is `Clone + PartialEq` so a fault
//! can be armed once and compared verbatim against what the caller received.

use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Error types reported by a document store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Namespace does not exist
    #[error("Namespace '{0}' does not exist")]
    NamespaceNotFound(String),

    /// An index with the same name but a different definition already exists
    #[error("Index '{index}' already exists in namespace '{namespace}' with a different definition")]
    IndexConflict {
        /// Namespace the index was added to
        namespace: String,
        /// Index name
        index: String,
    },

    /// Index definition is not acceptable for this namespace
    #[error("Invalid index '{index}' in namespace '{namespace}': {reason}")]
    InvalidIndex {
        /// Namespace the index was added to
        namespace: String,
        /// Index name
        index: String,
        /// What is wrong with the definition
        reason: String,
    },

    /// Namespace has neither a primary-key nor a unique index to upsert by
    #[error("Namespace '{0}' has no primary key index; only items with a key can be upserted")]
    NoPrimaryKey(String),

    /// Item lacks a value for the key field
    #[error("Item for namespace '{namespace}' has no value for key field '{field}'")]
    MissingPrimaryKey {
        /// Namespace written to
        namespace: String,
        /// Key field name
        field: String,
    },

    /// A unique index already holds this value under another key
    #[error("Duplicate value {value} for unique index '{index}' in namespace '{namespace}'")]
    UniqueViolation {
        /// Namespace written to
        namespace: String,
        /// Index name
        index: String,
        /// Offending value, rendered as JSON
        value: String,
    },

    /// Indexed field holds a value of the wrong type
    #[error("Field '{field}' expects {expected}, got {found}")]
    FieldType {
        /// Field name
        field: String,
        /// Declared type
        expected: String,
        /// JSON type actually found
        found: String,
    },

    /// Payload could not be parsed into an item
    #[error("Parse error: {0}")]
    Parse(String),

    /// Query is malformed
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Failure injected by a test double
    #[error("Injected failure: {0}")]
    Injected(String),
}

impl StoreError {
    /// Shorthand for an injected failure
    pub fn injected(msg: impl Into<String>) -> Self {
        StoreError::Injected(msg.into())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Parse(e.to_string())
    }
}
