use contentmgmt_core::mock::MockStorage;
use contentmgmt_core::{
    ContentCrud, EventBus, JsonObject, RequestHandlerContext, StorageContext, StorageContextUtils,
    StorageContextVersion, StorageError,
};
use contentmgmt_types::{ContentTypeId, Event, EventKind, EventPayload, Operation, Version};
use contentmgmt_versioning::get_transforms;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

fn ctx(request: u32, latest: u32) -> StorageContext {
    StorageContext {
        request_handler_context: RequestHandlerContext::default(),
        version: StorageContextVersion {
            request: Version::new(request).unwrap(),
            latest: Version::new(latest).unwrap(),
        },
        utils: StorageContextUtils::new(Arc::new(get_transforms)),
    }
}

fn object(value: serde_json::Value) -> JsonObject {
    value.as_object().cloned().unwrap()
}

struct Harness {
    crud: ContentCrud,
    storage: Arc<MockStorage>,
    events: UnboundedReceiver<Event>,
}

fn harness() -> Harness {
    let bus = Arc::new(EventBus::new());
    let (tx, events) = tokio::sync::mpsc::unbounded_channel();
    for kind in [EventKind::ItemStart, EventKind::ItemSuccess, EventKind::ItemError] {
        let tx = tx.clone();
        bus.subscribe(kind, None, move |event| {
            let _ = tx.send(event.clone());
        });
    }
    let storage = Arc::new(MockStorage::new());
    let crud = ContentCrud::new(
        ContentTypeId::new("foo").unwrap(),
        Arc::clone(&storage) as _,
        bus,
    );
    Harness { crud, storage, events }
}

fn drain(rx: &mut UnboundedReceiver<Event>) -> Vec<Event> {
    let mut out = Vec::new();
    while let Ok(event) = rx.try_recv() {
        out.push(event);
    }
    out
}

// ── success path ─────────────────────────────────────────────────

#[tokio::test]
async fn create_emits_start_then_success() {
    let mut h = harness();
    h.storage.respond_with(json!({"item": {"id": "1"}}));

    let result = h
        .crud
        .create(ctx(1, 2), object(json!({"title": "t"})), None)
        .await
        .unwrap();
    assert_eq!(result, json!({"item": {"id": "1"}}));

    let events = drain(&mut h.events);
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0].payload,
        EventPayload::ItemStart {
            operation: Operation::Create,
            request_version: Version::new(1).unwrap(),
            item_ids: vec![],
        }
    );
    assert_eq!(
        events[1].payload,
        EventPayload::ItemSuccess {
            operation: Operation::Create,
            request_version: Version::new(1).unwrap(),
            result: json!({"item": {"id": "1"}}),
        }
    );
    assert!(events.iter().all(|e| e.content_type_id.as_str() == "foo"));
}

#[tokio::test]
async fn get_passes_id_and_options_through() {
    let h = harness();
    h.crud
        .get(ctx(1, 1), "abc".into(), Some(object(json!({"fields": ["title"]}))))
        .await
        .unwrap();

    let calls = h.storage.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].operation, Operation::Get);
    assert_eq!(calls[0].ids, vec!["abc".to_string()]);
    assert_eq!(calls[0].options, Some(object(json!({"fields": ["title"]}))));
}

#[tokio::test]
async fn bulk_get_start_event_lists_ids() {
    let mut h = harness();
    h.crud
        .bulk_get(ctx(1, 1), vec!["a".into(), "b".into()], None)
        .await
        .unwrap();

    let events = drain(&mut h.events);
    match &events[0].payload {
        EventPayload::ItemStart { item_ids, operation, .. } => {
            assert_eq!(*operation, Operation::BulkGet);
            assert_eq!(item_ids, &vec!["a".to_string(), "b".to_string()]);
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

#[tokio::test]
async fn every_operation_reaches_storage() {
    let h = harness();
    h.crud.update(ctx(1, 1), "a".into(), JsonObject::new(), None).await.unwrap();
    h.crud.delete(ctx(1, 1), "a".into(), None).await.unwrap();
    h.crud.search(ctx(1, 1), object(json!({"text": "x"})), None).await.unwrap();

    let ops: Vec<Operation> = h.storage.calls().iter().map(|c| c.operation).collect();
    assert_eq!(ops, vec![Operation::Update, Operation::Delete, Operation::Search]);
}

// ── failure path ─────────────────────────────────────────────────

#[tokio::test]
async fn storage_error_is_returned_unchanged_and_published() {
    let mut h = harness();
    h.storage.fail_with(StorageError::NotFound("abc".into()));

    let err = h.crud.delete(ctx(2, 2), "abc".into(), None).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound(ref id) if id == "abc"));

    let events = drain(&mut h.events);
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[1].payload,
        EventPayload::ItemError {
            operation: Operation::Delete,
            request_version: Version::new(2).unwrap(),
            error: "item [abc] not found".into(),
        }
    );
}

#[tokio::test]
async fn crud_works_without_subscribers() {
    let storage = Arc::new(MockStorage::new());
    let crud = ContentCrud::new(
        ContentTypeId::new("foo").unwrap(),
        Arc::clone(&storage) as _,
        Arc::new(EventBus::new()),
    );
    crud.create(ctx(1, 1), JsonObject::new(), None).await.unwrap();
    assert_eq!(storage.call_count(), 1);
}
