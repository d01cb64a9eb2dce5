//! Lifecycle events published on the event bus.
//!
//! Two families of events exist: registry mutations (a content type was
//! registered, replaced or removed) and item lifecycle notifications
//! emitted around every storage call (start, then success or error).
//! Events are immutable once built and carry everything a subscriber needs.

use crate::{ContentTypeId, Operation, Version};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new time-ordered event ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Discriminant of an [`EventPayload`], used to filter subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    ContentTypeRegistered,
    ContentTypeUnregistered,
    ItemStart,
    ItemSuccess,
    ItemError,
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum EventPayload {
    /// A content type was added to the registry, or an existing entry
    /// was replaced.
    ContentTypeRegistered {
        latest_version: Version,
        replaced: bool,
    },

    /// A content type was removed from the registry.
    ContentTypeUnregistered,

    /// A storage call is about to be made.
    ItemStart {
        operation: Operation,
        request_version: Version,
        /// Item ids addressed by the call; empty for `create` and `search`.
        #[serde(default)]
        item_ids: Vec<String>,
    },

    /// A storage call completed.
    ItemSuccess {
        operation: Operation,
        request_version: Version,
        result: serde_json::Value,
    },

    /// A storage call failed. `error` is the handler's error message.
    ItemError {
        operation: Operation,
        request_version: Version,
        error: String,
    },
}

impl EventPayload {
    /// Returns the kind of this payload.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::ContentTypeRegistered { .. } => EventKind::ContentTypeRegistered,
            EventPayload::ContentTypeUnregistered => EventKind::ContentTypeUnregistered,
            EventPayload::ItemStart { .. } => EventKind::ItemStart,
            EventPayload::ItemSuccess { .. } => EventKind::ItemSuccess,
            EventPayload::ItemError { .. } => EventKind::ItemError,
        }
    }

    /// Returns the storage operation for item events.
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        match self {
            EventPayload::ItemStart { operation, .. }
            | EventPayload::ItemSuccess { operation, .. }
            | EventPayload::ItemError { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

/// An event concerning one content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier for this event.
    pub id: EventId,

    /// The content type this event concerns.
    pub content_type_id: ContentTypeId,

    /// When the event was built.
    pub emitted_at: DateTime<Utc>,

    /// The operation or mutation that happened.
    pub payload: EventPayload,
}

impl Event {
    /// Creates a new event stamped with the current time.
    #[must_use]
    pub fn new(content_type_id: ContentTypeId, payload: EventPayload) -> Self {
        Self {
            id: EventId::new(),
            content_type_id,
            emitted_at: Utc::now(),
            payload,
        }
    }

    /// Creates a registration event.
    #[must_use]
    pub fn registered(content_type_id: ContentTypeId, latest_version: Version, replaced: bool) -> Self {
        Self::new(
            content_type_id,
            EventPayload::ContentTypeRegistered {
                latest_version,
                replaced,
            },
        )
    }

    /// Creates an unregistration event.
    #[must_use]
    pub fn unregistered(content_type_id: ContentTypeId) -> Self {
        Self::new(content_type_id, EventPayload::ContentTypeUnregistered)
    }

    /// Creates an item-start event.
    #[must_use]
    pub fn item_start(
        content_type_id: ContentTypeId,
        operation: Operation,
        request_version: Version,
        item_ids: Vec<String>,
    ) -> Self {
        Self::new(
            content_type_id,
            EventPayload::ItemStart {
                operation,
                request_version,
                item_ids,
            },
        )
    }

    /// Creates an item-success event.
    #[must_use]
    pub fn item_success(
        content_type_id: ContentTypeId,
        operation: Operation,
        request_version: Version,
        result: serde_json::Value,
    ) -> Self {
        Self::new(
            content_type_id,
            EventPayload::ItemSuccess {
                operation,
                request_version,
                result,
            },
        )
    }

    /// Creates an item-error event.
    #[must_use]
    pub fn item_error(
        content_type_id: ContentTypeId,
        operation: Operation,
        request_version: Version,
        error: impl Into<String>,
    ) -> Self {
        Self::new(
            content_type_id,
            EventPayload::ItemError {
                operation,
                request_version,
                error: error.into(),
            },
        )
    }

    /// Shorthand for `self.payload.kind()`.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }
}
