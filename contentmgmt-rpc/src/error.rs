//! Error types for RPC procedures.

use contentmgmt_core::StorageError;
use contentmgmt_schema::ValidationError;
use contentmgmt_types::Version;
use thiserror::Error;

/// Result type for procedure calls.
pub type RpcResult<T> = Result<T, RpcError>;

/// Errors a procedure call can fail with. None of them is retried.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The request does not match the procedure's input schema.
    #[error(transparent)]
    InvalidInput(ValidationError),

    /// No content type is registered under the requested id.
    #[error("Content [{id}] is not registered.")]
    UnregisteredContentType { id: String },

    /// The requested version is newer than the registered latest version.
    /// `requested` is wide enough for integers no [`Version`] can hold.
    #[error("Invalid version. Latest version is [{latest}].")]
    VersionTooHigh { requested: u64, latest: Version },

    /// No procedure exists under the requested name.
    #[error("Procedure [{name}] is not registered.")]
    UnknownProcedure { name: String },

    /// The procedure produced a response that fails its output schema.
    #[error("Invalid response. {0}")]
    InvalidOutput(ValidationError),

    /// The storage handler failed. Passed through unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl RpcError {
    /// Stable name of the error kind, used on the wire.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            RpcError::InvalidInput(_) => "InvalidInput",
            RpcError::UnregisteredContentType { .. } => "UnregisteredContentType",
            RpcError::VersionTooHigh { .. } => "VersionTooHigh",
            RpcError::UnknownProcedure { .. } => "UnknownProcedure",
            RpcError::InvalidOutput(_) => "InvalidOutput",
            RpcError::Storage(_) => "StorageHandlerFailure",
        }
    }

    /// Whether the caller can fix the request and try again.
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, RpcError::InvalidOutput(_) | RpcError::Storage(_))
    }
}

impl From<ValidationError> for RpcError {
    fn from(err: ValidationError) -> Self {
        RpcError::InvalidInput(err)
    }
}
