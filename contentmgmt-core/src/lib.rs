//! Content registry core.
//!
//! Owns the pieces every RPC procedure depends on:
//! - [`EventBus`]: fire-and-forget lifecycle notifications
//! - [`ContentRegistry`]: which content types exist and how to reach their storage
//! - [`ContentStorage`]: the async storage handler contract a content type implements
//! - [`ContentCrud`]: wraps a storage handler and emits item lifecycle events
//! - [`MemoryStorage`]: an in-process storage handler
//!
//! The registry is written at startup (plugin load) and read on every
//! request. Readers clone an `Arc<ContentType>` out of the map, so no lock
//! is held while a storage call is awaited.

mod crud;
mod error;
mod event_bus;
mod memory;
pub mod mock;
mod registry;
mod storage;

pub use crud::ContentCrud;
pub use error::{CoreError, CoreResult};
pub use event_bus::{EventBus, SubscriptionId};
pub use memory::MemoryStorage;
pub use registry::{ContentRegistry, ContentType, ContentTypeDefinition, DuplicatePolicy, VersionInfo};
pub use storage::{
    ContentStorage, GetTransformsFn, RequestHandlerContext, StorageContext, StorageContextUtils,
    StorageContextVersion, StorageError, StorageResult,
};

/// A JSON object, the shape of every item payload and options bag.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;
