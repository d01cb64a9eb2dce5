use contentmgmt_core::EventBus;
use contentmgmt_types::{ContentTypeId, Event, EventKind, Operation, Version};
use std::sync::{Arc, Mutex};

fn id(s: &str) -> ContentTypeId {
    ContentTypeId::new(s).unwrap()
}

fn counter(bus: &EventBus, kind: EventKind, content_type: Option<&str>) -> Arc<Mutex<usize>> {
    let count = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&count);
    bus.subscribe(kind, content_type.map(id), move |_| {
        *sink.lock().unwrap() += 1;
    });
    count
}

#[test]
fn publish_without_subscribers_is_noop() {
    let bus = EventBus::new();
    bus.publish(Event::unregistered(id("foo")));
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn delivers_only_matching_kind() {
    let bus = EventBus::new();
    let registered = counter(&bus, EventKind::ContentTypeRegistered, None);
    let unregistered = counter(&bus, EventKind::ContentTypeUnregistered, None);

    bus.publish(Event::registered(id("foo"), Version::INITIAL, false));

    assert_eq!(*registered.lock().unwrap(), 1);
    assert_eq!(*unregistered.lock().unwrap(), 0);
}

#[test]
fn content_type_filter() {
    let bus = EventBus::new();
    let foo_only = counter(&bus, EventKind::ItemStart, Some("foo"));
    let all = counter(&bus, EventKind::ItemStart, None);

    bus.publish(Event::item_start(id("foo"), Operation::Create, Version::INITIAL, vec![]));
    bus.publish(Event::item_start(id("bar"), Operation::Create, Version::INITIAL, vec![]));

    assert_eq!(*foo_only.lock().unwrap(), 1);
    assert_eq!(*all.lock().unwrap(), 2);
}

#[test]
fn unsubscribe_stops_delivery() {
    let bus = EventBus::new();
    let count = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&count);
    let sub = bus.subscribe(EventKind::ContentTypeUnregistered, None, move |_| {
        *sink.lock().unwrap() += 1;
    });

    bus.publish(Event::unregistered(id("foo")));
    assert!(bus.unsubscribe(sub));
    assert!(!bus.unsubscribe(sub));
    bus.publish(Event::unregistered(id("foo")));

    assert_eq!(*count.lock().unwrap(), 1);
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn handler_may_publish_reentrantly() {
    let bus = Arc::new(EventBus::new());
    let inner = Arc::clone(&bus);
    bus.subscribe(EventKind::ContentTypeRegistered, None, move |event| {
        inner.publish(Event::unregistered(event.content_type_id.clone()));
    });
    let (_, mut rx) = bus.subscribe_channel(EventKind::ContentTypeUnregistered, None);

    bus.publish(Event::registered(id("foo"), Version::INITIAL, false));

    assert_eq!(rx.try_recv().unwrap().content_type_id, id("foo"));
}

#[tokio::test]
async fn channel_subscription_delivers_to_async_consumer() {
    let bus = EventBus::new();
    let (_, mut rx) = bus.subscribe_channel(EventKind::ItemSuccess, Some(id("foo")));

    bus.publish(Event::item_success(
        id("foo"),
        Operation::Get,
        Version::INITIAL,
        serde_json::json!({"item": 1}),
    ));

    let event = rx.recv().await.unwrap();
    assert_eq!(event.payload.operation(), Some(Operation::Get));
}

#[test]
fn dropped_channel_receiver_is_ignored() {
    let bus = EventBus::new();
    let (_, rx) = bus.subscribe_channel(EventKind::ContentTypeUnregistered, None);
    drop(rx);
    bus.publish(Event::unregistered(id("foo")));
}
