use super::{ProcedureName, ProcedureResponse, base_schema, resolve, with_options};
use crate::context::ProcedureContext;
use crate::error::RpcResult;
use crate::input::Fields;
use contentmgmt_core::JsonObject;
use contentmgmt_schema::{ObjectSchema, Schema};
use contentmgmt_types::Version;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchIn {
    pub content_type_id: String,
    pub version: Version,
    /// Storage-defined query, e.g. `{ "text": "sales", "limit": 10 }`.
    pub query: JsonObject,
    pub options: Option<JsonObject>,
}

impl SearchIn {
    pub(crate) fn from_fields(fields: &mut Fields) -> RpcResult<Self> {
        Ok(Self {
            content_type_id: fields.string("contentTypeId")?,
            version: fields.version()?,
            query: fields.object("query")?,
            options: fields.optional_object("options")?,
        })
    }
}

pub(super) fn input_schema() -> ObjectSchema {
    with_options(base_schema().field("query", Schema::open_object()))
}

pub async fn search(ctx: &ProcedureContext, input: SearchIn) -> RpcResult<ProcedureResponse> {
    let (content_type, storage_ctx) =
        resolve(ctx, ProcedureName::Search, &input.content_type_id, input.version)?;
    let result = content_type
        .crud()
        .search(storage_ctx, input.query, input.options)
        .await?;
    Ok(ProcedureResponse {
        content_type_id: input.content_type_id,
        result,
    })
}
