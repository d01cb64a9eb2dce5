//! The RPC procedures.
//!
//! Every procedure runs the same pipeline: validate the request against its
//! input schema, look up the content type, check the requested version,
//! build a [`StorageContext`] and dispatch to the content type's storage
//! through [`ContentCrud`](contentmgmt_core::ContentCrud). The storage
//! result is returned as-is under `result`.

mod bulk_get;
mod create;
mod delete;
mod get;
mod search;
mod update;

pub use bulk_get::{BulkGetIn, bulk_get};
pub use create::{CreateIn, create};
pub use delete::{DeleteIn, delete};
pub use get::{GetIn, get};
pub use search::{SearchIn, search};
pub use update::{UpdateIn, update};

use crate::context::ProcedureContext;
use crate::error::{RpcError, RpcResult};
use crate::input::Fields;
use contentmgmt_core::{ContentType, StorageContext, StorageContextUtils, StorageContextVersion};
use contentmgmt_schema::{ObjectSchema, Schema, ValidationError, ValidationErrorKind, type_name};
use contentmgmt_types::{Operation, Version};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Wire names of the procedures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcedureName {
    Get,
    BulkGet,
    Create,
    Update,
    Delete,
    Search,
}

impl ProcedureName {
    pub const ALL: [ProcedureName; 6] = [
        ProcedureName::Get,
        ProcedureName::BulkGet,
        ProcedureName::Create,
        ProcedureName::Update,
        ProcedureName::Delete,
        ProcedureName::Search,
    ];

    #[must_use]
    pub fn operation(self) -> Operation {
        match self {
            ProcedureName::Get => Operation::Get,
            ProcedureName::BulkGet => Operation::BulkGet,
            ProcedureName::Create => Operation::Create,
            ProcedureName::Update => Operation::Update,
            ProcedureName::Delete => Operation::Delete,
            ProcedureName::Search => Operation::Search,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.operation().as_str()
    }

    /// Schema every request to this procedure must satisfy.
    #[must_use]
    pub fn input_schema(self) -> Schema {
        let schema = match self {
            ProcedureName::Get => get::input_schema(),
            ProcedureName::BulkGet => bulk_get::input_schema(),
            ProcedureName::Create => create::input_schema(),
            ProcedureName::Update => update::input_schema(),
            ProcedureName::Delete => delete::input_schema(),
            ProcedureName::Search => search::input_schema(),
        };
        schema.into()
    }

    /// Schema every response of this procedure satisfies.
    #[must_use]
    pub fn output_schema(self) -> Schema {
        ObjectSchema::new()
            .field("contentTypeId", Schema::String)
            .field("result", Schema::PlainObject)
            .into()
    }
}

impl fmt::Display for ProcedureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcedureName {
    type Err = RpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProcedureName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| RpcError::UnknownProcedure { name: s.to_string() })
    }
}

/// What every procedure returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureResponse {
    pub content_type_id: String,
    pub result: Value,
}

/// Validates `input`, runs the procedure and validates its response.
pub async fn dispatch(ctx: &ProcedureContext, name: ProcedureName, input: Value) -> RpcResult<Value> {
    let input = match name.input_schema().validate(&input)? {
        Value::Object(map) => map,
        other => {
            return Err(ValidationError::new(ValidationErrorKind::NotPlainObject {
                actual: type_name(Some(&other)),
            })
            .into());
        }
    };
    let mut fields = Fields::new(input);
    if let Some(requested) = fields.oversized_version() {
        let content_type = lookup(ctx, &fields.string("contentTypeId")?)?;
        return Err(RpcError::VersionTooHigh {
            requested,
            latest: content_type.latest_version(),
        });
    }

    let response = match name {
        ProcedureName::Get => get(ctx, GetIn::from_fields(&mut fields)?).await?,
        ProcedureName::BulkGet => bulk_get(ctx, BulkGetIn::from_fields(&mut fields)?).await?,
        ProcedureName::Create => create(ctx, CreateIn::from_fields(&mut fields)?).await?,
        ProcedureName::Update => update(ctx, UpdateIn::from_fields(&mut fields)?).await?,
        ProcedureName::Delete => delete(ctx, DeleteIn::from_fields(&mut fields)?).await?,
        ProcedureName::Search => search(ctx, SearchIn::from_fields(&mut fields)?).await?,
    };

    let output = Value::Object(
        [
            ("contentTypeId".to_string(), Value::String(response.content_type_id)),
            ("result".to_string(), response.result),
        ]
        .into_iter()
        .collect(),
    );
    name.output_schema()
        .validate(&output)
        .map_err(RpcError::InvalidOutput)
}

/// Fields shared by every procedure input.
fn base_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field("contentTypeId", Schema::String)
        .field("version", Schema::number_min(1))
}

fn with_options(schema: ObjectSchema) -> ObjectSchema {
    schema.optional("options", Schema::PlainObject)
}

/// Looks up the content type, checks the requested version and builds the
/// storage context for one call.
fn resolve(
    ctx: &ProcedureContext,
    name: ProcedureName,
    content_type_id: &str,
    version: Version,
) -> RpcResult<(Arc<ContentType>, StorageContext)> {
    let content_type = lookup(ctx, content_type_id)?;

    let latest = content_type.latest_version();
    if version > latest {
        return Err(RpcError::VersionTooHigh {
            requested: u64::from(version.get()),
            latest,
        });
    }

    debug!(procedure = %name, content_type = %content_type_id, %version, %latest, "dispatching");
    let storage_ctx = StorageContext {
        request_handler_context: ctx.request_handler_context.clone(),
        version: StorageContextVersion {
            request: version,
            latest,
        },
        utils: StorageContextUtils::new(
            ctx.get_transforms_factory.for_content_type(content_type.id()),
        ),
    };
    Ok((content_type, storage_ctx))
}

fn lookup(ctx: &ProcedureContext, content_type_id: &str) -> RpcResult<Arc<ContentType>> {
    ctx.content_registry
        .get(content_type_id)
        .ok_or_else(|| RpcError::UnregisteredContentType {
            id: content_type_id.to_string(),
        })
}
