//! Recording storage handler for tests.

use crate::storage::{ContentStorage, StorageContext, StorageError, StorageResult};
use crate::JsonObject;
use async_trait::async_trait;
use contentmgmt_types::Operation;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// One call received by a [`MockStorage`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub operation: Operation,
    pub ctx: StorageContext,
    pub ids: Vec<String>,
    pub data: Option<JsonObject>,
    pub query: Option<JsonObject>,
    pub options: Option<JsonObject>,
}

/// A storage handler that records every call and answers from a queue of
/// canned responses (`{}` once the queue is empty).
#[derive(Debug, Default)]
pub struct MockStorage {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<StorageResult<Value>>>,
}

impl MockStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response for the next call.
    pub fn respond_with(&self, value: Value) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(value));
    }

    /// Queues a failure for the next call.
    pub fn fail_with(&self, err: StorageError) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(err));
    }

    /// Every call received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn record(&self, call: RecordedCall) -> StorageResult<Value> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Ok(json!({})))
    }
}

fn call(operation: Operation, ctx: StorageContext, options: Option<JsonObject>) -> RecordedCall {
    RecordedCall {
        operation,
        ctx,
        ids: Vec::new(),
        data: None,
        query: None,
        options,
    }
}

#[async_trait]
impl ContentStorage for MockStorage {
    async fn create(
        &self,
        ctx: StorageContext,
        data: JsonObject,
        options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        self.record(RecordedCall {
            data: Some(data),
            ..call(Operation::Create, ctx, options)
        })
    }

    async fn get(
        &self,
        ctx: StorageContext,
        id: String,
        options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        self.record(RecordedCall {
            ids: vec![id],
            ..call(Operation::Get, ctx, options)
        })
    }

    async fn bulk_get(
        &self,
        ctx: StorageContext,
        ids: Vec<String>,
        options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        self.record(RecordedCall {
            ids,
            ..call(Operation::BulkGet, ctx, options)
        })
    }

    async fn update(
        &self,
        ctx: StorageContext,
        id: String,
        data: JsonObject,
        options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        self.record(RecordedCall {
            ids: vec![id],
            data: Some(data),
            ..call(Operation::Update, ctx, options)
        })
    }

    async fn delete(
        &self,
        ctx: StorageContext,
        id: String,
        options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        self.record(RecordedCall {
            ids: vec![id],
            ..call(Operation::Delete, ctx, options)
        })
    }

    async fn search(
        &self,
        ctx: StorageContext,
        query: JsonObject,
        options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        self.record(RecordedCall {
            query: Some(query),
            ..call(Operation::Search, ctx, options)
        })
    }
}
