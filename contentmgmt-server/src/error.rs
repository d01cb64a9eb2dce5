//! Mapping of procedure errors onto HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use contentmgmt_rpc::RpcError;
use contentmgmt_schema::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Body of every error response.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// A failed procedure call, ready to be sent to the client.
#[derive(Debug)]
pub struct ApiError(pub RpcError);

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            RpcError::InvalidInput(_) | RpcError::VersionTooHigh { .. } => StatusCode::BAD_REQUEST,
            RpcError::UnregisteredContentType { .. } | RpcError::UnknownProcedure { .. } => {
                StatusCode::NOT_FOUND
            }
            RpcError::InvalidOutput(_) | RpcError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RpcError> for ApiError {
    fn from(err: RpcError) -> Self {
        Self(err)
    }
}

/// A body that is not a JSON document is invalid input like any other.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(RpcError::InvalidInput(ValidationError::new(
            ValidationErrorKind::Custom(rejection.body_text()),
        )))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(kind = self.0.kind(), error = %self.0, "procedure failed");
        }
        let body = ErrorBody {
            error: self.0.kind().to_string(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
