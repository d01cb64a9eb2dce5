use super::{ProcedureName, ProcedureResponse, base_schema, resolve, with_options};
use crate::context::ProcedureContext;
use crate::error::RpcResult;
use crate::input::Fields;
use contentmgmt_core::JsonObject;
use contentmgmt_schema::{ObjectSchema, Schema};
use contentmgmt_types::Version;

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteIn {
    pub content_type_id: String,
    pub version: Version,
    pub id: String,
    pub options: Option<JsonObject>,
}

impl DeleteIn {
    pub(crate) fn from_fields(fields: &mut Fields) -> RpcResult<Self> {
        Ok(Self {
            content_type_id: fields.string("contentTypeId")?,
            version: fields.version()?,
            id: fields.string("id")?,
            options: fields.optional_object("options")?,
        })
    }
}

pub(super) fn input_schema() -> ObjectSchema {
    with_options(base_schema().field("id", Schema::String))
}

pub async fn delete(ctx: &ProcedureContext, input: DeleteIn) -> RpcResult<ProcedureResponse> {
    let (content_type, storage_ctx) =
        resolve(ctx, ProcedureName::Delete, &input.content_type_id, input.version)?;
    let result = content_type
        .crud()
        .delete(storage_ctx, input.id, input.options)
        .await?;
    Ok(ProcedureResponse {
        content_type_id: input.content_type_id,
        result,
    })
}
