//! Storage handler contract.
//!
//! Each content type registers one [`ContentStorage`] implementation. The
//! procedures build a fresh [`StorageContext`] per call and hand it to the
//! handler by value; the handler owns it for the duration of the call.

use crate::JsonObject;
use async_trait::async_trait;
use contentmgmt_types::{Operation, Version};
use contentmgmt_versioning::{TransformBundle, TransformError, VersionedServiceDefinition};
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for storage calls.
pub type StorageResult<T> = Result<T, StorageError>;

/// Failures raised by a storage handler. Procedures propagate these to the
/// caller unchanged.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("operation [{0}] is not supported by this storage")]
    Unsupported(Operation),

    #[error("item [{0}] not found")]
    NotFound(String),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
    /// Wraps any handler-specific error.
    pub fn other(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        StorageError::Other(err.into())
    }
}

/// Opaque, caller-supplied context (auth, request scope, ...) passed
/// through to the storage handler untouched.
#[derive(Clone)]
pub struct RequestHandlerContext(Arc<dyn Any + Send + Sync>);

impl RequestHandlerContext {
    pub fn new<T: Any + Send + Sync>(inner: T) -> Self {
        Self(Arc::new(inner))
    }

    /// Borrows the inner value if it has type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Whether both handles point at the same context.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for RequestHandlerContext {
    fn default() -> Self {
        Self::new(())
    }
}

impl fmt::Debug for RequestHandlerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RequestHandlerContext(..)")
    }
}

/// Requested vs. latest schema version for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageContextVersion {
    pub request: Version,
    pub latest: Version,
}

/// Resolves a service's versioned definitions into transforms for a
/// requested version.
pub type GetTransformsFn =
    Arc<dyn Fn(&VersionedServiceDefinition, Version) -> TransformBundle + Send + Sync>;

/// Helpers available to storage handlers.
#[derive(Clone)]
pub struct StorageContextUtils {
    get_transforms: GetTransformsFn,
}

impl StorageContextUtils {
    #[must_use]
    pub fn new(get_transforms: GetTransformsFn) -> Self {
        Self { get_transforms }
    }

    /// Transforms for `definitions`, bound to `request_version`.
    #[must_use]
    pub fn get_transforms(
        &self,
        definitions: &VersionedServiceDefinition,
        request_version: Version,
    ) -> TransformBundle {
        (self.get_transforms)(definitions, request_version)
    }
}

impl fmt::Debug for StorageContextUtils {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageContextUtils")
            .field("get_transforms", &"<fn>")
            .finish()
    }
}

/// Per-call context handed to a storage handler.
#[derive(Debug, Clone)]
pub struct StorageContext {
    pub request_handler_context: RequestHandlerContext,
    pub version: StorageContextVersion,
    pub utils: StorageContextUtils,
}

/// The storage implementation behind a content type.
///
/// Only `create` is mandatory. The other operations fail with
/// [`StorageError::Unsupported`] unless overridden. `options` is `None`
/// when the caller sent none; it is never defaulted to an empty object.
#[async_trait]
pub trait ContentStorage: Send + Sync {
    async fn create(
        &self,
        ctx: StorageContext,
        data: JsonObject,
        options: Option<JsonObject>,
    ) -> StorageResult<Value>;

    async fn get(
        &self,
        ctx: StorageContext,
        id: String,
        options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        let _ = (ctx, id, options);
        Err(StorageError::Unsupported(Operation::Get))
    }

    async fn bulk_get(
        &self,
        ctx: StorageContext,
        ids: Vec<String>,
        options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        let _ = (ctx, ids, options);
        Err(StorageError::Unsupported(Operation::BulkGet))
    }

    async fn update(
        &self,
        ctx: StorageContext,
        id: String,
        data: JsonObject,
        options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        let _ = (ctx, id, data, options);
        Err(StorageError::Unsupported(Operation::Update))
    }

    async fn delete(
        &self,
        ctx: StorageContext,
        id: String,
        options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        let _ = (ctx, id, options);
        Err(StorageError::Unsupported(Operation::Delete))
    }

    async fn search(
        &self,
        ctx: StorageContext,
        query: JsonObject,
        options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        let _ = (ctx, query, options);
        Err(StorageError::Unsupported(Operation::Search))
    }
}
