//! In-process storage handler.
//!
//! Items are kept in a map keyed by a UUID v7 id. Stored attributes are
//! always in the latest schema shape: incoming data is migrated up from the
//! caller's version and results are migrated back down, using the service
//! definitions given at construction (none means pass-through).

use crate::storage::{ContentStorage, StorageContext, StorageError, StorageResult};
use crate::JsonObject;
use async_trait::async_trait;
use contentmgmt_types::Operation;
use contentmgmt_versioning::{ObjectField, TransformBundle, VersionedServiceDefinition};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

const DEFAULT_SEARCH_LIMIT: usize = 20;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, JsonObject>>,
    definitions: VersionedServiceDefinition,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that migrates objects through `definitions`.
    #[must_use]
    pub fn with_definitions(definitions: VersionedServiceDefinition) -> Self {
        Self {
            items: Mutex::default(),
            definitions,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn transforms(&self, ctx: &StorageContext) -> TransformBundle {
        ctx.utils.get_transforms(&self.definitions, ctx.version.request)
    }

    fn load(&self, id: &str) -> Option<JsonObject> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }
}

fn item(id: &str, attributes: JsonObject) -> Value {
    json!({ "id": id, "attributes": attributes })
}

/// Migrates request data up to the latest version.
fn data_up(transforms: &TransformBundle, operation: Operation, data: JsonObject) -> StorageResult<JsonObject> {
    let value = transforms
        .operation(operation)
        .input(ObjectField::Data)
        .up(Value::Object(data))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StorageError::other(format!(
            "data migrated to a non-object value: {other}"
        ))),
    }
}

/// Migrates a result back down to the caller's version.
fn result_down(transforms: &TransformBundle, operation: Operation, result: Value) -> StorageResult<Value> {
    Ok(transforms
        .operation(operation)
        .output(ObjectField::Result)
        .down(result)?)
}

fn matches_text(attributes: &JsonObject, text: &str) -> bool {
    let needle = text.to_lowercase();
    attributes.values().any(|v| match v {
        Value::String(s) => s.to_lowercase().contains(&needle),
        _ => false,
    })
}

#[async_trait]
impl ContentStorage for MemoryStorage {
    async fn create(
        &self,
        ctx: StorageContext,
        data: JsonObject,
        options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        let transforms = self.transforms(&ctx);
        let attributes = data_up(&transforms, Operation::Create, data)?;
        let id = options
            .as_ref()
            .and_then(|o| o.get("id"))
            .and_then(Value::as_str)
            .map_or_else(|| Uuid::now_v7().to_string(), str::to_string);

        {
            let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
            let overwrite = options
                .as_ref()
                .and_then(|o| o.get("overwrite"))
                .and_then(Value::as_bool)
                .unwrap_or(false);
            if items.contains_key(&id) && !overwrite {
                return Err(StorageError::other(format!("item [{id}] already exists")));
            }
            items.insert(id.clone(), attributes.clone());
        }

        result_down(&transforms, Operation::Create, json!({ "item": item(&id, attributes) }))
    }

    async fn get(
        &self,
        ctx: StorageContext,
        id: String,
        _options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        let attributes = self.load(&id).ok_or_else(|| StorageError::NotFound(id.clone()))?;
        let transforms = self.transforms(&ctx);
        result_down(&transforms, Operation::Get, json!({ "item": item(&id, attributes) }))
    }

    async fn bulk_get(
        &self,
        ctx: StorageContext,
        ids: Vec<String>,
        _options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        let hits: Vec<Value> = ids
            .iter()
            .map(|id| match self.load(id) {
                Some(attributes) => json!({ "item": item(id, attributes) }),
                None => json!({ "item": { "id": id, "error": StorageError::NotFound(id.clone()).to_string() } }),
            })
            .collect();
        let transforms = self.transforms(&ctx);
        result_down(&transforms, Operation::BulkGet, json!({ "hits": hits }))
    }

    async fn update(
        &self,
        ctx: StorageContext,
        id: String,
        data: JsonObject,
        _options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        let transforms = self.transforms(&ctx);
        let patch = data_up(&transforms, Operation::Update, data)?;
        let attributes = {
            let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
            let existing = items
                .get_mut(&id)
                .ok_or_else(|| StorageError::NotFound(id.clone()))?;
            existing.extend(patch);
            existing.clone()
        };
        result_down(&transforms, Operation::Update, json!({ "item": item(&id, attributes) }))
    }

    async fn delete(
        &self,
        ctx: StorageContext,
        id: String,
        _options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        let removed = self
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
        if removed.is_none() {
            return Err(StorageError::NotFound(id));
        }
        let transforms = self.transforms(&ctx);
        result_down(&transforms, Operation::Delete, json!({ "success": true }))
    }

    async fn search(
        &self,
        ctx: StorageContext,
        query: JsonObject,
        options: Option<JsonObject>,
    ) -> StorageResult<Value> {
        let text = query.get("text").and_then(Value::as_str).unwrap_or_default();
        let limit = query
            .get("limit")
            .or_else(|| options.as_ref().and_then(|o| o.get("limit")))
            .and_then(Value::as_u64)
            .map_or(DEFAULT_SEARCH_LIMIT, |l| l as usize);

        let (total, hits) = {
            let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
            let matching: Vec<_> = items
                .iter()
                .filter(|(_, attributes)| text.is_empty() || matches_text(attributes, text))
                .collect();
            let hits: Vec<Value> = matching
                .iter()
                .take(limit)
                .map(|(id, attributes)| item(id, (*attributes).clone()))
                .collect();
            (matching.len(), hits)
        };

        let transforms = self.transforms(&ctx);
        result_down(
            &transforms,
            Operation::Search,
            json!({ "hits": hits, "pagination": { "total": total } }),
        )
    }
}
