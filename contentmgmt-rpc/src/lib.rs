//! RPC procedures for content management.
//!
//! Callers address a procedure by name (`get`, `bulkGet`, `create`,
//! `update`, `delete`, `search`) and send a JSON request naming a content
//! type and the schema version they speak. The procedure validates the
//! request, negotiates the version against the content type's latest
//! version and hands the call to the content type's storage handler:
//!
//! ```text
//! request -> input schema -> registry lookup -> version check
//!         -> StorageContext { caller ctx, { request, latest }, get_transforms }
//!         -> storage -> { contentTypeId, result }
//! ```
//!
//! Storage failures reach the caller unchanged.

mod context;
mod error;
mod input;
pub mod procedures;
mod rpc;

pub use context::{GetTransformsFactory, ProcedureContext, ServiceObjectTransforms};
pub use error::{RpcError, RpcResult};
pub use procedures::{ProcedureName, ProcedureResponse, dispatch};
pub use rpc::Rpc;
