use crate::context::{GetTransformsFactory, ProcedureContext, ServiceObjectTransforms};
use crate::error::RpcResult;
use crate::procedures::{ProcedureName, dispatch};
use contentmgmt_core::{ContentRegistry, RequestHandlerContext};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Entry point for callers holding a procedure name and a JSON request.
#[derive(Clone)]
pub struct Rpc {
    content_registry: Arc<ContentRegistry>,
    get_transforms_factory: Arc<dyn GetTransformsFactory>,
}

impl Rpc {
    /// Serves procedures against `content_registry` with
    /// [`ServiceObjectTransforms`].
    pub fn new(content_registry: Arc<ContentRegistry>) -> Self {
        Self::with_transforms_factory(content_registry, Arc::new(ServiceObjectTransforms::new()))
    }

    pub fn with_transforms_factory(
        content_registry: Arc<ContentRegistry>,
        get_transforms_factory: Arc<dyn GetTransformsFactory>,
    ) -> Self {
        Self {
            content_registry,
            get_transforms_factory,
        }
    }

    #[must_use]
    pub fn content_registry(&self) -> &Arc<ContentRegistry> {
        &self.content_registry
    }

    /// Context for one request made on behalf of `request_handler_context`.
    #[must_use]
    pub fn context(&self, request_handler_context: RequestHandlerContext) -> ProcedureContext {
        ProcedureContext::new(
            Arc::clone(&self.content_registry),
            request_handler_context,
            Arc::clone(&self.get_transforms_factory),
        )
    }

    /// Runs the procedure called `name` (its wire name, e.g. `bulkGet`).
    pub async fn call(
        &self,
        request_handler_context: RequestHandlerContext,
        name: &str,
        input: Value,
    ) -> RpcResult<Value> {
        let name: ProcedureName = name.parse()?;
        let ctx = self.context(request_handler_context);
        let result = dispatch(&ctx, name, input).await;
        if let Err(err) = &result {
            debug!(procedure = %name, kind = err.kind(), error = %err, "procedure failed");
        }
        result
    }
}

impl std::fmt::Debug for Rpc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rpc")
            .field("content_registry", &self.content_registry)
            .finish_non_exhaustive()
    }
}
