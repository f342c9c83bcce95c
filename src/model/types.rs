//! Tag vocabulary shared across the structural model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a concrete structure type, e.g. `"MSH"` or `"OSM_R26_SHIPMENT"`.
///
/// Tags are open: the model never interprets them, it only hands them to the
/// [`StructureFactory`](crate::StructureFactory) that maps tags to concrete
/// types for a given protocol version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTag(String);

impl TypeTag {
    /// Create a new type tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeTag {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

impl From<String> for TypeTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl AsRef<str> for TypeTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for TypeTag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Protocol version tag carried by a message root, e.g. `"2.6"`.
///
/// Set once at message construction and never mutated; the model itself
/// attaches no meaning to it beyond handing it to structure factories.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    /// Create a new version tag
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// The version as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Version {
    fn from(version: &str) -> Self {
        Self(version.to_string())
    }
}

impl From<String> for Version {
    fn from(version: String) -> Self {
        Self(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tag_display_and_eq() {
        let tag = TypeTag::new("MSH");
        assert_eq!(tag.as_str(), "MSH");
        assert_eq!(tag.to_string(), "MSH");
        assert_eq!(tag, TypeTag::from("MSH"));
        assert_ne!(tag, TypeTag::from("PID"));
    }

    #[test]
    fn test_version_ordering() {
        assert!(Version::new("2.6") < Version::new("2.7"));
        assert_eq!(Version::new("2.6").as_str(), "2.6");
    }
}
