//! # Value Objects
//!
//! Keyspace names, record type tags and package identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace holding public definitions and private per-org approvals.
pub const NAMESPACES_NAME: &str = "namespaces";

/// Namespace holding, in an org's private scope only, which installed package
/// backs each approval.
pub const CHAINCODE_SOURCES_NAME: &str = "chaincode-sources";

/// Reserved namespace of the lifecycle itself; always implicitly defined.
pub const LIFECYCLE_NAMESPACE: &str = "_lifecycle";

/// Field carrying the committed sequence of a public definition.
pub const SEQUENCE_FIELD: &str = "Sequence";

/// Label reported for chaincode namespaces by namespace queries.
pub const FRIENDLY_CHAINCODE_DEFINITION_TYPE: &str = "Chaincode";

/// Key of an org's private record for `name` at `sequence`.
#[must_use]
pub fn private_key(name: &str, sequence: i64) -> String {
    format!("{name}#{sequence}")
}

// =============================================================================
// DATATYPE
// =============================================================================

/// Type tag stored in a record's metadata.
///
/// Tags written by other components decode as [`Datatype::Other`] so that
/// readers can report them without failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Datatype {
    /// Public, committed chaincode definition.
    ChaincodeDefinition,
    /// An org's approved parameters for one sequence.
    ChaincodeParameters,
    /// An org's local package reference for one sequence.
    ChaincodeLocalPackage,
    /// Any tag this version does not know.
    Other(String),
}

impl Datatype {
    /// Parse a stored tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ChaincodeDefinition" => Self::ChaincodeDefinition,
            "ChaincodeParameters" => Self::ChaincodeParameters,
            "LocalPackage" => Self::ChaincodeLocalPackage,
            other => Self::Other(other.to_string()),
        }
    }

    /// Tag as written to state.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ChaincodeDefinition => "ChaincodeDefinition",
            Self::ChaincodeParameters => "ChaincodeParameters",
            Self::ChaincodeLocalPackage => "LocalPackage",
            Self::Other(tag) => tag,
        }
    }

    /// Human-facing label for namespace listings.
    #[must_use]
    pub fn friendly_name(&self) -> &str {
        match self {
            Self::ChaincodeDefinition => FRIENDLY_CHAINCODE_DEFINITION_TYPE,
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// PACKAGE ID
// =============================================================================

/// Identifier of an installed package, `name:version`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PackageId(String);

impl PackageId {
    /// Build the id for `name` at `version`.
    #[must_use]
    pub fn new(name: &str, version: &str) -> Self {
        Self(format!("{name}:{version}"))
    }

    /// The id as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
