//! The storage operations a content type exposes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A storage operation, named the way it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Get,
    BulkGet,
    Create,
    Update,
    Delete,
    Search,
}

impl Operation {
    /// Every operation, in wire order.
    pub const ALL: [Operation; 6] = [
        Operation::Get,
        Operation::BulkGet,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
        Operation::Search,
    ];

    /// The wire name (`"bulkGet"`, `"create"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::BulkGet => "bulkGet",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Search => "search",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}
