//! Per-request procedure context and the transforms factory.

use contentmgmt_core::{ContentRegistry, GetTransformsFn, RequestHandlerContext};
use contentmgmt_types::{ContentTypeId, Version};
use contentmgmt_versioning::{VersionedServiceDefinition, get_transforms};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Builds the `get_transforms` helper handed to a content type's storage.
pub trait GetTransformsFactory: Send + Sync {
    fn for_content_type(&self, content_type_id: &ContentTypeId) -> GetTransformsFn;
}

/// Resolves transforms through [`get_transforms`] on every call.
///
/// Each bundle is compiled from the definitions the storage handler passes
/// in, so handlers may build their definitions per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceObjectTransforms;

impl ServiceObjectTransforms {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl GetTransformsFactory for ServiceObjectTransforms {
    fn for_content_type(&self, content_type_id: &ContentTypeId) -> GetTransformsFn {
        let content_type_id = content_type_id.clone();
        Arc::new(
            move |definitions: &VersionedServiceDefinition, request_version: Version| {
                trace!(content_type = %content_type_id, version = %request_version, "compiling transforms");
                get_transforms(definitions, request_version)
            },
        )
    }
}

/// Everything a procedure needs to serve one request.
#[derive(Clone)]
pub struct ProcedureContext {
    pub content_registry: Arc<ContentRegistry>,
    /// Opaque caller context, passed to storage untouched.
    pub request_handler_context: RequestHandlerContext,
    pub get_transforms_factory: Arc<dyn GetTransformsFactory>,
}

impl ProcedureContext {
    pub fn new(
        content_registry: Arc<ContentRegistry>,
        request_handler_context: RequestHandlerContext,
        get_transforms_factory: Arc<dyn GetTransformsFactory>,
    ) -> Self {
        Self {
            content_registry,
            request_handler_context,
            get_transforms_factory,
        }
    }
}

impl fmt::Debug for ProcedureContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcedureContext")
            .field("content_registry", &self.content_registry)
            .field("request_handler_context", &self.request_handler_context)
            .finish_non_exhaustive()
    }
}
