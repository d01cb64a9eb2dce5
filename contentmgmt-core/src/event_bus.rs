//! In-process event bus.
//!
//! Subscribers register a handler for one [`EventKind`], optionally scoped
//! to a single content type. `publish` is fire-and-forget: it runs every
//! matching handler synchronously and returns nothing.

use contentmgmt_types::{ContentTypeId, Event, EventKind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::mpsc;
use tracing::trace;

type EventHandler = Arc<dyn Fn(&Event) + Send + Sync>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    content_type_id: Option<ContentTypeId>,
    handler: EventHandler,
}

impl Subscription {
    fn matches(&self, event: &Event) -> bool {
        self.kind == event.kind()
            && self
                .content_type_id
                .as_ref()
                .is_none_or(|id| *id == event.content_type_id)
    }
}

#[derive(Default)]
pub struct EventBus {
    subscriptions: RwLock<Vec<Subscription>>,
    next_id: AtomicU64,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every handler subscribed to this event's kind (and content
    /// type). Handlers run outside the subscription lock, so a handler may
    /// itself publish or subscribe.
    pub fn publish(&self, event: Event) {
        let handlers: Vec<EventHandler> = self
            .subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|s| s.matches(&event))
            .map(|s| Arc::clone(&s.handler))
            .collect();

        trace!(
            kind = ?event.kind(),
            content_type = %event.content_type_id,
            handlers = handlers.len(),
            "publishing event"
        );
        for handler in handlers {
            handler(&event);
        }
    }

    /// Registers `handler` for events of `kind`. With `content_type_id`
    /// set, only events for that content type are delivered.
    pub fn subscribe(
        &self,
        kind: EventKind,
        content_type_id: Option<ContentTypeId>,
        handler: impl Fn(&Event) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Subscription {
                id,
                kind,
                content_type_id,
                handler: Arc::new(handler),
            });
        id
    }

    /// Like `subscribe`, but delivers events into a channel for async
    /// consumers. Events published after the receiver is dropped are
    /// discarded.
    pub fn subscribe_channel(
        &self,
        kind: EventKind,
        content_type_id: Option<ContentTypeId>,
    ) -> (SubscriptionId, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.subscribe(kind, content_type_id, move |event| {
            let _ = tx.send(event.clone());
        });
        (id, rx)
    }

    /// Removes a subscription. Returns whether it existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self
            .subscriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        subscriptions.len() != before
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
