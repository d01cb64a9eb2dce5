//! Validation errors.

use serde_json::Value;
use std::fmt;

/// Name of a JSON value's type as it appears in validation messages.
/// `None` stands for a missing field.
#[must_use]
pub fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "Array",
        Some(Value::Object(_)) => "Object",
    }
}

/// What went wrong at a given path.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationErrorKind {
    /// The value has the wrong type (or is missing).
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    /// The key is not declared by an object schema that forbids unknowns.
    UnknownKey,
    /// A plain object was required.
    NotPlainObject { actual: &'static str },
    /// A number is below the schema's minimum.
    BelowMinimum { min: i64 },
    /// Free-form message from a caller-side check.
    Custom(String),
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationErrorKind::TypeMismatch { expected, actual } => {
                write!(f, "expected value of type [{expected}] but got [{actual}]")
            }
            ValidationErrorKind::UnknownKey => f.write_str("definition for this key is missing"),
            ValidationErrorKind::NotPlainObject { actual } => {
                write!(f, "expected a plain object value, but found [{actual}] instead.")
            }
            ValidationErrorKind::BelowMinimum { min } => {
                write!(f, "Value must be equal to or greater than [{min}].")
            }
            ValidationErrorKind::Custom(message) => f.write_str(message),
        }
    }
}

/// A validation failure, qualified by the path of the offending field.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    path: Vec<String>,
    kind: ValidationErrorKind,
}

impl ValidationError {
    /// Creates an error at the root of the validated value.
    #[must_use]
    pub fn new(kind: ValidationErrorKind) -> Self {
        Self {
            path: Vec::new(),
            kind,
        }
    }

    /// Creates a free-form error at `path`.
    #[must_use]
    pub fn custom(path: &str, message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::Custom(message.into())).at(path)
    }

    /// Prefixes the error path with `segment`.
    #[must_use]
    pub fn at(mut self, segment: impl Into<String>) -> Self {
        self.path.insert(0, segment.into());
        self
    }

    /// Dot-joined path of the offending field; empty at the root.
    #[must_use]
    pub fn path(&self) -> String {
        self.path.join(".")
    }

    #[must_use]
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }

    /// The full message, same as `to_string()`.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "[{}]: {}", self.path(), self.kind)
        }
    }
}

impl std::error::Error for ValidationError {}
