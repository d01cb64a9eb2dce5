//! HTTP API for the content management service.

mod config;
mod error;

pub use config::{ConfigSource, ContentTypeConfig, RegistryConfig, ServerConfig, DEFAULT_PORT};
pub use error::{ApiError, ErrorBody};

use axum::{
    Router,
    extract::{Path, State, rejection::JsonRejection},
    response::Json,
    routing::{get, post},
};
use contentmgmt_core::{
    ContentRegistry, ContentTypeDefinition, CoreResult, EventBus, MemoryStorage,
    RequestHandlerContext,
};
use contentmgmt_rpc::Rpc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Per-request context handed through to storage handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestScope {
    pub request_id: Uuid,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeSummary {
    pub id: String,
    pub latest_version: u32,
}

async fn rpc_handler(
    State(rpc): State<Arc<Rpc>>,
    Path(name): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(input) = payload?;
    let scope = RequestScope {
        request_id: Uuid::now_v7(),
    };
    debug!(procedure = %name, request_id = %scope.request_id, "rpc request");
    let output = rpc
        .call(RequestHandlerContext::new(scope), &name, input)
        .await?;
    Ok(Json(output))
}

async fn content_types_handler(State(rpc): State<Arc<Rpc>>) -> Json<Vec<ContentTypeSummary>> {
    let registry = rpc.content_registry();
    let summaries = registry
        .ids()
        .into_iter()
        .filter_map(|id| registry.get(id.as_str()))
        .map(|content_type| ContentTypeSummary {
            id: content_type.id().to_string(),
            latest_version: content_type.latest_version().get(),
        })
        .collect();
    Json(summaries)
}

/// Build the HTTP API router over the given procedures.
pub fn build_router(rpc: Arc<Rpc>) -> Router {
    Router::new()
        .route("/api/content_management/rpc/{name}", post(rpc_handler))
        .route("/api/content_management/content_types", get(content_types_handler))
        .with_state(rpc)
}

/// Creates the registry described by `config`, every content type backed by
/// its own [`MemoryStorage`].
pub fn registry_from_config(config: &ServerConfig) -> CoreResult<Arc<ContentRegistry>> {
    let registry = Arc::new(ContentRegistry::with_duplicate_policy(
        Arc::new(EventBus::new()),
        config.registry.on_duplicate,
    ));
    for content_type in &config.content_types {
        registry.register(ContentTypeDefinition::from_parts(
            &content_type.id,
            Arc::new(MemoryStorage::new()),
            content_type.latest_version,
        )?)?;
    }
    Ok(registry)
}
