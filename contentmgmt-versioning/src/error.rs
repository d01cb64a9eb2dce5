//! Error types for object transforms.

use contentmgmt_schema::ValidationError;
use contentmgmt_types::Version;
use thiserror::Error;

/// Result of an `up`/`down` transform: the migrated value or the reason it
/// could not be produced.
pub type TransformResult = Result<serde_json::Value, TransformError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// The object does not match the schema of the version it claims.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid version to up transform to [{0}].")]
    InvalidUpTarget(Version),

    #[error("Invalid version to down transform from [{0}].")]
    InvalidDownSource(Version),
}

impl TransformError {
    /// Returns the validation error, if that is what this is.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            TransformError::Validation(e) => Some(e),
            _ => None,
        }
    }
}
