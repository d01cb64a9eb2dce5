//! Core type definitions for the content management service.
//!
//! This crate defines the small, storage-agnostic types shared by every
//! other crate in the workspace:
//! - Content type identifiers and schema versions
//! - The storage operations a content type exposes
//! - Lifecycle events published on the event bus
//!
//! Nothing here knows what a content item looks like; item payloads are
//! opaque JSON owned by each content type's storage handler.

mod event;
mod ids;
mod operation;
mod version;

pub use event::{Event, EventId, EventKind, EventPayload};
pub use ids::ContentTypeId;
pub use operation::Operation;
pub use version::Version;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing core types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("content type id must not be empty")]
    EmptyContentTypeId,

    #[error("invalid version [{0}]: expected an integer greater than or equal to 1")]
    InvalidVersion(String),
}
