//! Event-emitting wrapper around a content type's storage handler.

use crate::event_bus::EventBus;
use crate::storage::{ContentStorage, StorageContext, StorageResult};
use crate::JsonObject;
use contentmgmt_types::{ContentTypeId, Event, Operation, Version};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Calls a storage handler and publishes `ItemStart` before the call and
/// `ItemSuccess` / `ItemError` after it. Results and errors are returned
/// exactly as the handler produced them.
#[derive(Clone)]
pub struct ContentCrud {
    content_type_id: ContentTypeId,
    storage: Arc<dyn ContentStorage>,
    event_bus: Arc<EventBus>,
}

impl ContentCrud {
    pub fn new(
        content_type_id: ContentTypeId,
        storage: Arc<dyn ContentStorage>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            content_type_id,
            storage,
            event_bus,
        }
    }

    pub async fn get(
        &self,
        ctx: StorageContext,
        id: String,
        options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        let version = ctx.version.request;
        self.start(Operation::Get, version, vec![id.clone()]);
        let result = self.storage.get(ctx, id, options).await;
        self.finish(Operation::Get, version, result)
    }

    pub async fn bulk_get(
        &self,
        ctx: StorageContext,
        ids: Vec<String>,
        options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        let version = ctx.version.request;
        self.start(Operation::BulkGet, version, ids.clone());
        let result = self.storage.bulk_get(ctx, ids, options).await;
        self.finish(Operation::BulkGet, version, result)
    }

    pub async fn create(
        &self,
        ctx: StorageContext,
        data: JsonObject,
        options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        let version = ctx.version.request;
        self.start(Operation::Create, version, Vec::new());
        let result = self.storage.create(ctx, data, options).await;
        self.finish(Operation::Create, version, result)
    }

    pub async fn update(
        &self,
        ctx: StorageContext,
        id: String,
        data: JsonObject,
        options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        let version = ctx.version.request;
        self.start(Operation::Update, version, vec![id.clone()]);
        let result = self.storage.update(ctx, id, data, options).await;
        self.finish(Operation::Update, version, result)
    }

    pub async fn delete(
        &self,
        ctx: StorageContext,
        id: String,
        options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        let version = ctx.version.request;
        self.start(Operation::Delete, version, vec![id.clone()]);
        let result = self.storage.delete(ctx, id, options).await;
        self.finish(Operation::Delete, version, result)
    }

    pub async fn search(
        &self,
        ctx: StorageContext,
        query: JsonObject,
        options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        let version = ctx.version.request;
        self.start(Operation::Search, version, Vec::new());
        let result = self.storage.search(ctx, query, options).await;
        self.finish(Operation::Search, version, result)
    }

    fn start(&self, operation: Operation, version: Version, item_ids: Vec<String>) {
        debug!(content_type = %self.content_type_id, %operation, %version, "storage call");
        self.event_bus.publish(Event::item_start(
            self.content_type_id.clone(),
            operation,
            version,
            item_ids,
        ));
    }

    fn finish(
        &self,
        operation: Operation,
        version: Version,
        result: StorageResult<Value>,
    ) -> StorageResult<Value> {
        let event = match &result {
            Ok(value) => Event::item_success(self.content_type_id.clone(), operation, version, value.clone()),
            Err(err) => {
                debug!(content_type = %self.content_type_id, %operation, error = %err, "storage call failed");
                Event::item_error(self.content_type_id.clone(), operation, version, err.to_string())
            }
        };
        self.event_bus.publish(event);
        result
    }
}

impl std::fmt::Debug for ContentCrud {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentCrud")
            .field("content_type_id", &self.content_type_id)
            .finish_non_exhaustive()
    }
}
