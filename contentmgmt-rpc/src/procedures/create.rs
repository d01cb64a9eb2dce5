use super::{ProcedureName, ProcedureResponse, base_schema, resolve, with_options};
use crate::context::ProcedureContext;
use crate::error::RpcResult;
use crate::input::Fields;
use contentmgmt_core::JsonObject;
use contentmgmt_schema::{ObjectSchema, Schema};
use contentmgmt_types::Version;

/// A `create` request.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateIn {
    pub content_type_id: String,
    pub version: Version,
    /// Item attributes, opaque to the procedure.
    pub data: JsonObject,
    /// Passed to storage exactly as received. `None` stays `None`.
    pub options: Option<JsonObject>,
}

impl CreateIn {
    pub(crate) fn from_fields(fields: &mut Fields) -> RpcResult<Self> {
        Ok(Self {
            content_type_id: fields.string("contentTypeId")?,
            version: fields.version()?,
            data: fields.object("data")?,
            options: fields.optional_object("options")?,
        })
    }
}

pub(super) fn input_schema() -> ObjectSchema {
    with_options(base_schema().field("data", Schema::open_object()))
}

/// Creates an item through the content type's storage.
pub async fn create(ctx: &ProcedureContext, input: CreateIn) -> RpcResult<ProcedureResponse> {
    let (content_type, storage_ctx) =
        resolve(ctx, ProcedureName::Create, &input.content_type_id, input.version)?;
    let result = content_type
        .crud()
        .create(storage_ctx, input.data, input.options)
        .await?;
    Ok(ProcedureResponse {
        content_type_id: input.content_type_id,
        result,
    })
}
