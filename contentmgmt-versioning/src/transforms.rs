use crate::definition::{Direction, ObjectField, ObjectPath, VersionedServiceDefinition};
use crate::error::{TransformError, TransformResult};
use contentmgmt_schema::ValidationError;
use contentmgmt_types::{Operation, Version};
use serde_json::Value;
use std::sync::Arc;
use tracing::trace;

/// Compiles `definitions` into transforms for callers on `request_version`.
///
/// The latest version is the highest version declared in `definitions`
/// (never lower than `request_version`).
#[must_use]
pub fn get_transforms(definitions: &VersionedServiceDefinition, request_version: Version) -> TransformBundle {
    let latest_version = definitions
        .latest()
        .map_or(request_version, |latest| latest.max(request_version));
    TransformBundle {
        definitions: Arc::new(definitions.clone()),
        request_version,
        latest_version,
    }
}

/// Transforms for every object of a service, bound to one requested
/// version.
#[derive(Debug, Clone)]
pub struct TransformBundle {
    definitions: Arc<VersionedServiceDefinition>,
    request_version: Version,
    latest_version: Version,
}

impl TransformBundle {
    #[must_use]
    pub fn request_version(&self) -> Version {
        self.request_version
    }

    #[must_use]
    pub fn latest_version(&self) -> Version {
        self.latest_version
    }

    /// Transforms for a single object.
    #[must_use]
    pub fn object(&self, path: ObjectPath) -> ObjectTransforms {
        ObjectTransforms {
            bundle: self.clone(),
            path,
        }
    }

    #[must_use]
    pub fn operation(&self, operation: Operation) -> OperationTransforms {
        OperationTransforms {
            bundle: self.clone(),
            operation,
        }
    }

    #[must_use]
    pub fn get(&self) -> OperationTransforms {
        self.operation(Operation::Get)
    }

    #[must_use]
    pub fn bulk_get(&self) -> OperationTransforms {
        self.operation(Operation::BulkGet)
    }

    #[must_use]
    pub fn create(&self) -> OperationTransforms {
        self.operation(Operation::Create)
    }

    #[must_use]
    pub fn update(&self) -> OperationTransforms {
        self.operation(Operation::Update)
    }

    #[must_use]
    pub fn delete(&self) -> OperationTransforms {
        self.operation(Operation::Delete)
    }

    #[must_use]
    pub fn search(&self) -> OperationTransforms {
        self.operation(Operation::Search)
    }
}

/// Transforms for the objects of one operation.
#[derive(Debug, Clone)]
pub struct OperationTransforms {
    bundle: TransformBundle,
    operation: Operation,
}

impl OperationTransforms {
    /// An object of the request (`data`, `options`, `query`).
    #[must_use]
    pub fn input(&self, field: ObjectField) -> ObjectTransforms {
        self.bundle
            .object(ObjectPath::new(self.operation, Direction::In, field))
    }

    /// An object of the response (`result`).
    #[must_use]
    pub fn output(&self, field: ObjectField) -> ObjectTransforms {
        self.bundle
            .object(ObjectPath::new(self.operation, Direction::Out, field))
    }
}

/// `up`, `down` and `validate` for one object.
#[derive(Debug, Clone)]
pub struct ObjectTransforms {
    bundle: TransformBundle,
    path: ObjectPath,
}

impl ObjectTransforms {
    #[must_use]
    pub fn path(&self) -> ObjectPath {
        self.path
    }

    /// Validates `value` against the requested version, then migrates it up
    /// to the latest version.
    pub fn up(&self, value: Value) -> TransformResult {
        self.up_to(value, self.bundle.latest_version)
    }

    /// Like [`up`](Self::up) but stops at `to`.
    pub fn up_to(&self, value: Value, to: Version) -> TransformResult {
        let from = self.bundle.request_version;
        if to > self.bundle.latest_version || to < from {
            return Err(TransformError::InvalidUpTarget(to));
        }
        self.check(&value, from)?;
        if to == from {
            return Ok(value);
        }

        let definitions = &self.bundle.definitions;
        let steps: Vec<_> = definitions
            .migrations_between(from, to, &self.path)
            .filter_map(|m| m.up_fn())
            .collect();
        trace!(path = %self.path, %from, %to, steps = steps.len(), "up transform");
        Ok(steps.into_iter().fold(value, |acc, f| f(acc)))
    }

    /// Migrates `value` from the latest version down to the requested
    /// version, then validates the result.
    pub fn down(&self, value: Value) -> TransformResult {
        self.down_from(value, self.bundle.latest_version)
    }

    /// Like [`down`](Self::down) but starts from `from`.
    pub fn down_from(&self, value: Value, from: Version) -> TransformResult {
        let to = self.bundle.request_version;
        if from > self.bundle.latest_version || from < to {
            return Err(TransformError::InvalidDownSource(from));
        }

        let value = if from == to {
            value
        } else {
            let definitions = &self.bundle.definitions;
            let steps: Vec<_> = definitions
                .migrations_between(to, from, &self.path)
                .rev()
                .filter_map(|m| m.down_fn())
                .collect();
            trace!(path = %self.path, %from, %to, steps = steps.len(), "down transform");
            steps.into_iter().fold(value, |acc, f| f(acc))
        };

        self.check(&value, to)?;
        Ok(value)
    }

    /// Validates `value` against the requested version's schema.
    #[must_use]
    pub fn validate(&self, value: &Value) -> Option<ValidationError> {
        self.validate_at(value, self.bundle.request_version)
    }

    /// Validates `value` against the schema declared at `version`. No
    /// declaration means no constraint.
    #[must_use]
    pub fn validate_at(&self, value: &Value, version: Version) -> Option<ValidationError> {
        self.check(value, version).err()
    }

    fn check(&self, value: &Value, version: Version) -> Result<(), ValidationError> {
        match self
            .bundle
            .definitions
            .migration(version, &self.path)
            .and_then(|m| m.schema_ref())
        {
            Some(schema) => schema.validate(value).map(|_| ()),
            None => Ok(()),
        }
    }
}
