//! Object schemas for validating JSON request and response payloads.
//!
//! A [`Schema`] describes the expected shape of a `serde_json::Value`.
//! Validation walks the value, coerces where the schema allows it (numeric
//! strings for number fields) and reports the first violation as a
//! [`ValidationError`] whose message is qualified by the offending field
//! path, e.g. `[data]: expected value of type [object] but got [number]`.
//!
//! Object fields are checked in declaration order; unknown keys are checked
//! after all declared fields.

mod error;
mod schema;

pub use error::{ValidationError, ValidationErrorKind, type_name};
pub use schema::{ObjectSchema, Schema, Unknowns};

/// Result type for validation.
pub type Result<T> = std::result::Result<T, ValidationError>;
