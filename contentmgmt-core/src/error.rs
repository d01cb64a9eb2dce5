//! Error types for the registry.

use thiserror::Error;

/// Result type for registry operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The definition is malformed, or its id is taken and the registry
    /// rejects duplicates.
    #[error("{reason}")]
    DuplicateOrInvalidDescriptor { id: String, reason: String },
}

impl CoreError {
    pub(crate) fn duplicate(id: &str) -> Self {
        CoreError::DuplicateOrInvalidDescriptor {
            id: id.to_string(),
            reason: format!("Content [{id}] is already registered."),
        }
    }

    pub(crate) fn invalid(id: &str, cause: contentmgmt_types::Error) -> Self {
        CoreError::DuplicateOrInvalidDescriptor {
            id: id.to_string(),
            reason: format!("Invalid content type definition [{id}]: {cause}"),
        }
    }
}
