use super::{ProcedureName, ProcedureResponse, base_schema, resolve, with_options};
use crate::context::ProcedureContext;
use crate::error::RpcResult;
use crate::input::Fields;
use contentmgmt_core::JsonObject;
use contentmgmt_schema::{ObjectSchema, Schema};
use contentmgmt_types::Version;

#[derive(Debug, Clone, PartialEq)]
pub struct BulkGetIn {
    pub content_type_id: String,
    pub version: Version,
    pub ids: Vec<String>,
    pub options: Option<JsonObject>,
}

impl BulkGetIn {
    pub(crate) fn from_fields(fields: &mut Fields) -> RpcResult<Self> {
        Ok(Self {
            content_type_id: fields.string("contentTypeId")?,
            version: fields.version()?,
            ids: fields.strings("ids")?,
            options: fields.optional_object("options")?,
        })
    }
}

pub(super) fn input_schema() -> ObjectSchema {
    with_options(base_schema().field("ids", Schema::array_of(Schema::String)))
}

/// Fetches several items in one storage call. Per-item failures are the
/// storage's to report inside `result`.
pub async fn bulk_get(ctx: &ProcedureContext, input: BulkGetIn) -> RpcResult<ProcedureResponse> {
    let (content_type, storage_ctx) =
        resolve(ctx, ProcedureName::BulkGet, &input.content_type_id, input.version)?;
    let result = content_type
        .crud()
        .bulk_get(storage_ctx, input.ids, input.options)
        .await?;
    Ok(ProcedureResponse {
        content_type_id: input.content_type_id,
        result,
    })
}
