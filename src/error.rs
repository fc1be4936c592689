//! Error types for strata.

use thiserror::Error;

use crate::index::ReferenceId;

/// Errors that can occur while building an index.
///
/// Search never fails: an empty index, an empty query, or a query with no
/// qualifying overlap are all "no match" results, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A reference id was added to a cluster index twice.
    #[error("reference {id} was already added to this index")]
    DuplicateReference { id: ReferenceId },

    /// A sketch's native scaled value does not match the index's finest layer.
    #[error("sketch has scaled {actual}, index ingests references at scaled {expected}")]
    ResolutionMismatch { expected: u64, actual: u64 },

    /// Invalid configuration value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;
