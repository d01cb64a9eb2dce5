//! Object versioning for content type services.
//!
//! A content type declares, per schema version, how each object crossing
//! its service boundary (request data, options, queries, results) is
//! validated and how it migrates to the next version (`up`) or back from
//! the next version (`down`). [`get_transforms`] compiles those declarations for
//! one requested version into a [`TransformBundle`]:
//!
//! - `up` validates an object sent by a caller on the requested version and
//!   migrates it to the latest version
//! - `down` migrates an object from the latest version back to the requested
//!   version and validates the result
//!
//! Objects without a declaration pass through unchanged.

mod definition;
mod error;
mod transforms;

pub use definition::{
    Direction, ObjectField, ObjectMigration, ObjectPath, ServiceDefinition, TransformFn,
    VersionedServiceDefinition,
};
pub use error::{TransformError, TransformResult};
pub use transforms::{ObjectTransforms, OperationTransforms, TransformBundle, get_transforms};
