//! Error types for Sedge.

use thiserror::Error;

/// The error type for all fallible Sedge operations.
#[derive(Debug, Error)]
pub enum SedgeError {
    /// Invalid engine or policy configuration. Fatal at construction time,
    /// never raised per-request.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The corpus reader failed while feeding a vocabulary rebuild. The
    /// previously published vocabulary stays in effect.
    #[error("corpus read failed: {0}")]
    Corpus(String),

    /// A bounded vocabulary rebuild ran out of budget before finishing.
    /// The previously published vocabulary stays in effect.
    #[error("vocabulary rebuild exceeded its deadline after {0} documents")]
    RebuildTimeout(usize),

    /// A document handed to the indexer violates the data model
    /// (e.g. a non-finite or non-positive field weight).
    #[error("invalid document '{id}': {reason}")]
    Document {
        /// Identifier of the offending document.
        id: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// A specialized `Result` type for Sedge operations.
pub type Result<T> = std::result::Result<T, SedgeError>;

impl SedgeError {
    /// Create a configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SedgeError::Config(msg.into())
    }

    /// Create a corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        SedgeError::Corpus(msg.into())
    }

    /// Create a document error.
    pub fn document<I: Into<String>, R: Into<String>>(id: I, reason: R) -> Self {
        SedgeError::Document {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
