//! Declarations of how service objects are validated and migrated.

use contentmgmt_schema::Schema;
use contentmgmt_types::{Operation, Version};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A migration step applied to a JSON object.
pub type TransformFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Whether an object flows into the service (request) or out of it
/// (response).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    In,
    Out,
}

/// Which object of a request or response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectField {
    Data,
    Options,
    Query,
    Result,
}

impl ObjectField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ObjectField::Data => "data",
            ObjectField::Options => "options",
            ObjectField::Query => "query",
            ObjectField::Result => "result",
        }
    }
}

/// Address of one service object, e.g. `create.in.options`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectPath {
    pub operation: Operation,
    pub direction: Direction,
    pub field: ObjectField,
}

impl ObjectPath {
    #[must_use]
    pub const fn new(operation: Operation, direction: Direction, field: ObjectField) -> Self {
        Self {
            operation,
            direction,
            field,
        }
    }

    #[must_use]
    pub const fn input(operation: Operation, field: ObjectField) -> Self {
        Self::new(operation, Direction::In, field)
    }

    #[must_use]
    pub const fn output(operation: Operation, field: ObjectField) -> Self {
        Self::new(operation, Direction::Out, field)
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::In => "in",
            Direction::Out => "out",
        };
        write!(f, "{}.{}.{}", self.operation, direction, self.field.as_str())
    }
}

/// How one object looks at version N, and how it moves between N and N + 1.
#[derive(Clone, Default)]
pub struct ObjectMigration {
    schema: Option<Schema>,
    up: Option<TransformFn>,
    down: Option<TransformFn>,
}

impl ObjectMigration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema the object must satisfy at this version.
    #[must_use]
    pub fn schema(mut self, schema: impl Into<Schema>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Migrates the object from this version to the next one.
    #[must_use]
    pub fn up(mut self, f: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.up = Some(Arc::new(f));
        self
    }

    /// Migrates the object from the next version back to this one.
    #[must_use]
    pub fn down(mut self, f: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.down = Some(Arc::new(f));
        self
    }

    pub(crate) fn schema_ref(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    pub(crate) fn up_fn(&self) -> Option<&TransformFn> {
        self.up.as_ref()
    }

    pub(crate) fn down_fn(&self) -> Option<&TransformFn> {
        self.down.as_ref()
    }
}

impl fmt::Debug for ObjectMigration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectMigration")
            .field("schema", &self.schema)
            .field("up", &self.up.is_some())
            .field("down", &self.down.is_some())
            .finish()
    }
}

/// Every object declaration of a service at one version.
#[derive(Debug, Clone, Default)]
pub struct ServiceDefinition {
    objects: BTreeMap<ObjectPath, ObjectMigration>,
}

impl ServiceDefinition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the migration for `path`, replacing any previous one.
    #[must_use]
    pub fn object(mut self, path: ObjectPath, migration: ObjectMigration) -> Self {
        self.objects.insert(path, migration);
        self
    }

    #[must_use]
    pub fn get(&self, path: &ObjectPath) -> Option<&ObjectMigration> {
        self.objects.get(path)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// A service's definitions keyed by version.
#[derive(Debug, Clone, Default)]
pub struct VersionedServiceDefinition {
    versions: BTreeMap<Version, ServiceDefinition>,
}

impl VersionedServiceDefinition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the definition for `version`.
    #[must_use]
    pub fn version(mut self, version: Version, definition: ServiceDefinition) -> Self {
        self.versions.insert(version, definition);
        self
    }

    /// Highest declared version.
    #[must_use]
    pub fn latest(&self) -> Option<Version> {
        self.versions.keys().next_back().copied()
    }

    #[must_use]
    pub fn get(&self, version: Version) -> Option<&ServiceDefinition> {
        self.versions.get(&version)
    }

    /// Declaration of `path` at `version`, if any.
    #[must_use]
    pub fn migration(&self, version: Version, path: &ObjectPath) -> Option<&ObjectMigration> {
        self.versions.get(&version).and_then(|d| d.get(path))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Declarations of `path` for every version in `from..to`, ascending.
    /// Version N's migration moves an object between N and N + 1, so the
    /// target version's own declaration is never part of the hop.
    pub(crate) fn migrations_between<'a>(
        &'a self,
        from: Version,
        to: Version,
        path: &'a ObjectPath,
    ) -> impl DoubleEndedIterator<Item = &'a ObjectMigration> + 'a {
        self.versions
            .range(from..to)
            .filter_map(move |(_, definition)| definition.get(path))
    }
}
