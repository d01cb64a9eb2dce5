//! Extraction of typed fields from a request that already passed its
//! input schema.

use crate::error::{RpcError, RpcResult};
use contentmgmt_core::JsonObject;
use contentmgmt_schema::{ValidationError, ValidationErrorKind, type_name};
use contentmgmt_types::Version;
use serde_json::Value;

pub(crate) struct Fields(JsonObject);

impl Fields {
    pub(crate) fn new(input: JsonObject) -> Self {
        Self(input)
    }

    pub(crate) fn string(&mut self, key: &str) -> RpcResult<String> {
        match self.0.remove(key) {
            Some(Value::String(s)) => Ok(s),
            other => Err(mismatch("string", other.as_ref()).at(key).into()),
        }
    }

    pub(crate) fn strings(&mut self, key: &str) -> RpcResult<Vec<String>> {
        match self.0.remove(key) {
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::String(s) => Ok(s),
                    other => Err(RpcError::from(mismatch("string", Some(&other)).at(i.to_string()).at(key))),
                })
                .collect(),
            other => Err(mismatch("Array", other.as_ref()).at(key).into()),
        }
    }

    pub(crate) fn object(&mut self, key: &str) -> RpcResult<JsonObject> {
        match self.0.remove(key) {
            Some(Value::Object(map)) => Ok(map),
            other => Err(mismatch("object", other.as_ref()).at(key).into()),
        }
    }

    /// `None` when the caller left the field out.
    pub(crate) fn optional_object(&mut self, key: &str) -> RpcResult<Option<JsonObject>> {
        match self.0.remove(key) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(other) => Err(mismatch("object", Some(&other)).at(key).into()),
        }
    }

    /// A `version` that is a whole number too large for any [`Version`].
    /// Such a request is above every registered latest version.
    pub(crate) fn oversized_version(&self) -> Option<u64> {
        let whole = match self.0.get("version")? {
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(whole_f64)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<u64>().ok().or_else(|| s.parse::<f64>().ok().and_then(whole_f64))
            }
            _ => None,
        }?;
        (whole > u64::from(u32::MAX)).then_some(whole)
    }

    /// The `version` field. Decimal versions such as `1.5` are rejected.
    pub(crate) fn version(&mut self) -> RpcResult<Version> {
        match self.0.remove("version") {
            Some(v) => Version::from_json(&v)
                .map_err(|e| RpcError::from(ValidationError::custom("version", e.to_string()))),
            None => Err(mismatch("number", None).at("version").into()),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_f64(f: f64) -> Option<u64> {
    (f.is_finite() && f.fract() == 0.0 && f >= 1.0).then(|| f as u64)
}

fn mismatch(expected: &'static str, actual: Option<&Value>) -> ValidationError {
    ValidationError::new(ValidationErrorKind::TypeMismatch {
        expected,
        actual: type_name(actual),
    })
}
