use crate::error::{ValidationError, ValidationErrorKind, type_name};
use serde_json::{Map, Value};

/// Whether an object schema accepts keys it does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Unknowns {
    /// Undeclared keys fail with "definition for this key is missing".
    #[default]
    Forbid,
    /// Undeclared keys are kept as-is.
    Allow,
}

/// The expected shape of a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    String,
    /// A number. Numeric strings are coerced.
    Number { min: Option<i64> },
    Boolean,
    /// An object with declared fields.
    Object(ObjectSchema),
    /// Any JSON object; its contents are not inspected.
    PlainObject,
    ArrayOf(Box<Schema>),
    /// The inner schema, or a missing field.
    Maybe(Box<Schema>),
    Any,
}

impl Schema {
    #[must_use]
    pub fn number() -> Self {
        Schema::Number { min: None }
    }

    #[must_use]
    pub fn number_min(min: i64) -> Self {
        Schema::Number { min: Some(min) }
    }

    #[must_use]
    pub fn array_of(item: Schema) -> Self {
        Schema::ArrayOf(Box::new(item))
    }

    #[must_use]
    pub fn maybe(inner: Schema) -> Self {
        Schema::Maybe(Box::new(inner))
    }

    /// An object that accepts any keys.
    #[must_use]
    pub fn open_object() -> Self {
        Schema::Object(ObjectSchema::new().unknowns(Unknowns::Allow))
    }

    /// Validates `value` and returns it, coerced where the schema allows.
    pub fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        self.validate_field(Some(value))?
            .ok_or_else(|| mismatch(self.expected_type(), None))
    }

    /// Validates a possibly-missing field. `Ok(None)` means the field was
    /// absent and the schema allows that.
    fn validate_field(&self, value: Option<&Value>) -> Result<Option<Value>, ValidationError> {
        if let Schema::Maybe(inner) = self {
            return match value {
                None => Ok(None),
                Some(_) => inner.validate_field(value),
            };
        }

        let Some(value) = value else {
            return Err(mismatch(self.expected_type(), None));
        };

        let validated = match self {
            Schema::String => match value {
                Value::String(_) => value.clone(),
                other => return Err(mismatch("string", Some(other))),
            },
            Schema::Number { min } => {
                let n = coerce_number(value).ok_or_else(|| mismatch("number", Some(value)))?;
                if let Some(min) = min
                    && n.as_f64().is_some_and(|f| f < *min as f64)
                {
                    return Err(ValidationError::new(ValidationErrorKind::BelowMinimum {
                        min: *min,
                    }));
                }
                Value::Number(n)
            }
            Schema::Boolean => match value {
                Value::Bool(_) => value.clone(),
                other => return Err(mismatch("boolean", Some(other))),
            },
            Schema::Object(object) => match value {
                Value::Object(map) => Value::Object(object.validate_map(map)?),
                other => return Err(mismatch("object", Some(other))),
            },
            Schema::PlainObject => match value {
                Value::Object(_) => value.clone(),
                other => {
                    return Err(ValidationError::new(ValidationErrorKind::NotPlainObject {
                        actual: type_name(Some(other)),
                    }));
                }
            },
            Schema::ArrayOf(item) => match value {
                Value::Array(items) => {
                    let mut out = Vec::with_capacity(items.len());
                    for (i, entry) in items.iter().enumerate() {
                        out.push(item.validate(entry).map_err(|e| e.at(i.to_string()))?);
                    }
                    Value::Array(out)
                }
                other => return Err(mismatch("Array", Some(other))),
            },
            Schema::Any => value.clone(),
            Schema::Maybe(inner) => return inner.validate_field(Some(value)),
        };
        Ok(Some(validated))
    }

    fn expected_type(&self) -> &'static str {
        match self {
            Schema::String => "string",
            Schema::Number { .. } => "number",
            Schema::Boolean => "boolean",
            Schema::Object(_) | Schema::PlainObject => "object",
            Schema::ArrayOf(_) => "Array",
            Schema::Maybe(inner) => inner.expected_type(),
            Schema::Any => "any",
        }
    }
}

fn mismatch(expected: &'static str, actual: Option<&Value>) -> ValidationError {
    ValidationError::new(ValidationErrorKind::TypeMismatch {
        expected,
        actual: type_name(actual),
    })
}

fn coerce_number(value: &Value) -> Option<serde_json::Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            if let Ok(i) = trimmed.parse::<i64>() {
                return Some(i.into());
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
        }
        _ => None,
    }
}

/// Declared fields of an object, in validation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    fields: Vec<(String, Schema)>,
    unknowns: Unknowns,
}

impl ObjectSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a required field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.fields.push((name.into(), schema));
        self
    }

    /// Declares an optional field.
    #[must_use]
    pub fn optional(self, name: impl Into<String>, schema: Schema) -> Self {
        self.field(name, Schema::maybe(schema))
    }

    #[must_use]
    pub fn unknowns(mut self, unknowns: Unknowns) -> Self {
        self.unknowns = unknowns;
        self
    }

    /// Names of the declared fields.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Validates a JSON object against the declared fields.
    pub fn validate_map(&self, map: &Map<String, Value>) -> Result<Map<String, Value>, ValidationError> {
        let mut out = Map::new();
        for (name, schema) in &self.fields {
            if let Some(value) = schema
                .validate_field(map.get(name))
                .map_err(|e| e.at(name.clone()))?
            {
                out.insert(name.clone(), value);
            }
        }

        for (key, value) in map {
            if self.fields.iter().any(|(name, _)| name == key) {
                continue;
            }
            match self.unknowns {
                Unknowns::Forbid => {
                    return Err(ValidationError::new(ValidationErrorKind::UnknownKey).at(key.clone()));
                }
                Unknowns::Allow => {
                    out.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(out)
    }
}

impl From<ObjectSchema> for Schema {
    fn from(object: ObjectSchema) -> Self {
        Schema::Object(object)
    }
}
