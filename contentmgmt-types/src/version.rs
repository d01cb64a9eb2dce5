//! Schema version numbers.
//!
//! Content types version their schemas with plain positive integers. The
//! latest registered version is the upper bound a caller may request.

use crate::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// A schema version, always `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version(NonZeroU32);

impl Version {
    /// The first version of any content type.
    pub const INITIAL: Version = Version(NonZeroU32::MIN);

    /// Creates a version, rejecting zero.
    pub fn new(version: u32) -> Result<Self, Error> {
        NonZeroU32::new(version)
            .map(Self)
            .ok_or_else(|| Error::InvalidVersion(version.to_string()))
    }

    /// Returns the version as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns the next version.
    ///
    /// Saturates at `u32::MAX`.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns the previous version, or `None` for version 1.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        NonZeroU32::new(self.get() - 1).map(Self)
    }

    /// Parses a version from a decimal string. Leading and trailing
    /// whitespace is ignored; `"1.0"` is accepted as `1`.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let trimmed = s.trim();
        if let Ok(v) = trimmed.parse::<u32>() {
            return Self::new(v);
        }
        match trimmed.parse::<f64>() {
            Ok(f) => Self::from_f64(f).ok_or_else(|| Error::InvalidVersion(s.to_string())),
            Err(_) => Err(Error::InvalidVersion(s.to_string())),
        }
    }

    /// Converts a JSON value (number or numeric string) into a version.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, Error> {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    u32::try_from(u)
                        .map_err(|_| Error::InvalidVersion(n.to_string()))
                        .and_then(Self::new)
                } else {
                    n.as_f64()
                        .and_then(Self::from_f64)
                        .ok_or_else(|| Error::InvalidVersion(n.to_string()))
                }
            }
            serde_json::Value::String(s) => Self::parse(s),
            other => Err(Error::InvalidVersion(other.to_string())),
        }
    }

    fn from_f64(f: f64) -> Option<Self> {
        if f.fract() != 0.0 || f < 1.0 || f > f64::from(u32::MAX) {
            return None;
        }
        NonZeroU32::new(f as u32).map(Self)
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<u32> for Version {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Version> for u32 {
    fn from(v: Version) -> Self {
        v.get()
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.get())
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}
