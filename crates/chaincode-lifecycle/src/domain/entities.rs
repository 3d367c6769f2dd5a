//! # Domain Entities
//!
//! Records the lifecycle persists through the codec, plus the package and
//! channel descriptions exchanged with outbound ports.
//!
//! Ledger records use `PascalCase` field names; each field becomes its own
//! state entry, so renaming or re-typing a field changes the on-ledger layout
//! and breaks agreement checks against records written by older peers.

use crate::domain::value_objects::{Datatype, PackageId};
use crate::errors::ParameterMismatch;
use crate::serializer::StateRecord;
use serde::{Deserialize, Serialize};

// =============================================================================
// DEFINITION PARTS
// =============================================================================

/// How a chaincode is endorsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EndorsementInfo {
    /// Chaincode version string.
    pub version: String,
    /// Endorsement plugin identifier.
    pub endorsement_plugin: String,
    /// Whether `Init` must be invoked before any other function.
    pub init_required: bool,
}

/// How transactions of a chaincode are validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ValidationInfo {
    /// Validation plugin identifier.
    pub validation_plugin: String,
    /// Opaque policy bytes handed to the plugin.
    pub validation_parameter: Vec<u8>,
}

/// A private data collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StaticCollectionConfig {
    /// Collection name.
    pub name: String,
    /// Serialized signature policy selecting member orgs.
    pub member_orgs_policy: Vec<u8>,
    /// Peers the endorser must disseminate to.
    pub required_peer_count: i32,
    /// Peers the endorser may disseminate to.
    pub maximum_peer_count: i32,
    /// Blocks after which private data is purged; 0 keeps it forever.
    pub block_to_live: u64,
    /// Only members may read.
    pub member_only_read: bool,
    /// Only members may write.
    pub member_only_write: bool,
}

/// All collections of a chaincode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CollectionConfigPackage {
    /// Collections in declaration order.
    pub config: Vec<StaticCollectionConfig>,
}

// =============================================================================
// CHAINCODE PARAMETERS
// =============================================================================

/// The comparable part of a chaincode definition.
///
/// This is what an org approves at `namespace#sequence` in its private scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChaincodeParameters {
    /// Endorsement settings.
    pub endorsement_info: EndorsementInfo,
    /// Validation settings.
    pub validation_info: ValidationInfo,
    /// Private data collections.
    pub collections: CollectionConfigPackage,
}

impl ChaincodeParameters {
    /// Bundle the parameter parts.
    #[must_use]
    pub fn new(
        endorsement_info: EndorsementInfo,
        validation_info: ValidationInfo,
        collections: CollectionConfigPackage,
    ) -> Self {
        Self {
            endorsement_info,
            validation_info,
            collections,
        }
    }

    /// Compare against `other`, reporting the first field that differs.
    pub fn compare(&self, other: &Self) -> Result<(), ParameterMismatch> {
        let (ours, theirs) = (&self.endorsement_info, &other.endorsement_info);
        if ours.version != theirs.version {
            return Err(ParameterMismatch::Version {
                ours: ours.version.clone(),
                theirs: theirs.version.clone(),
            });
        }
        if ours.endorsement_plugin != theirs.endorsement_plugin {
            return Err(ParameterMismatch::EndorsementPlugin {
                ours: ours.endorsement_plugin.clone(),
                theirs: theirs.endorsement_plugin.clone(),
            });
        }
        if ours.init_required != theirs.init_required {
            return Err(ParameterMismatch::InitRequired {
                ours: ours.init_required,
                theirs: theirs.init_required,
            });
        }

        let (ours, theirs) = (&self.validation_info, &other.validation_info);
        if ours.validation_plugin != theirs.validation_plugin {
            return Err(ParameterMismatch::ValidationPlugin {
                ours: ours.validation_plugin.clone(),
                theirs: theirs.validation_plugin.clone(),
            });
        }
        if ours.validation_parameter != theirs.validation_parameter {
            return Err(ParameterMismatch::ValidationParameter {
                ours: ours.validation_parameter.clone(),
                theirs: theirs.validation_parameter.clone(),
            });
        }

        if self.collections != other.collections {
            return Err(ParameterMismatch::Collections);
        }

        Ok(())
    }
}

impl StateRecord for ChaincodeParameters {
    const DATATYPE: Datatype = Datatype::ChaincodeParameters;
}

// =============================================================================
// CHAINCODE DEFINITION
// =============================================================================

/// A committed (or proposed) definition: parameters plus sequence.
///
/// Kept flat rather than embedding [`ChaincodeParameters`] so its encoding
/// does not depend on the nested type's layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChaincodeDefinition {
    /// Position in the namespace's definition history, starting at 1.
    pub sequence: i64,
    /// Endorsement settings.
    pub endorsement_info: EndorsementInfo,
    /// Validation settings.
    pub validation_info: ValidationInfo,
    /// Private data collections.
    pub collections: CollectionConfigPackage,
}

impl ChaincodeDefinition {
    /// Definition of `parameters` at `sequence`.
    #[must_use]
    pub fn new(sequence: i64, parameters: ChaincodeParameters) -> Self {
        Self {
            sequence,
            endorsement_info: parameters.endorsement_info,
            validation_info: parameters.validation_info,
            collections: parameters.collections,
        }
    }

    /// Definition reported for the lifecycle's own namespace: no endorsement
    /// or validation requirements.
    #[must_use]
    pub fn implicit_lifecycle() -> Self {
        Self::default()
    }

    /// The non-sequence part, used for every agreement comparison.
    #[must_use]
    pub fn parameters(&self) -> ChaincodeParameters {
        ChaincodeParameters {
            endorsement_info: self.endorsement_info.clone(),
            validation_info: self.validation_info.clone(),
            collections: self.collections.clone(),
        }
    }
}

impl StateRecord for ChaincodeDefinition {
    const DATATYPE: Datatype = Datatype::ChaincodeDefinition;
}

// =============================================================================
// LOCAL PACKAGE
// =============================================================================

/// Which locally installed package an org backs an approval with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChaincodeLocalPackage {
    /// Content hash of the installed package.
    pub hash: Vec<u8>,
}

impl StateRecord for ChaincodeLocalPackage {
    const DATATYPE: Datatype = Datatype::ChaincodeLocalPackage;
}

// =============================================================================
// PACKAGES
// =============================================================================

/// Metadata carried inside an install package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodePackageMetadata {
    /// Runtime type, e.g. `golang`, `node`.
    pub chaincode_type: String,
    /// Source path within the package.
    pub path: String,
}

/// A parsed install package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodePackage {
    /// Package metadata.
    pub metadata: ChaincodePackageMetadata,
    /// Code payload.
    pub code_package: Vec<u8>,
}

/// One `name:version` under which a package hash is installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeMetadata {
    /// Chaincode name.
    pub name: String,
    /// Chaincode version.
    pub version: String,
}

/// Entry of the installed chaincode listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledChaincode {
    /// Chaincode name.
    pub name: String,
    /// Chaincode version.
    pub version: String,
    /// Content hash of the package.
    pub hash: Vec<u8>,
}

impl InstalledChaincode {
    /// The `name:version` id of this entry.
    #[must_use]
    pub fn package_id(&self) -> PackageId {
        PackageId::new(&self.name, &self.version)
    }
}

// =============================================================================
// CHANNELS
// =============================================================================

/// The parts of a channel's configuration the lifecycle needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Channel id.
    pub channel_id: String,
    /// Member organization (MSP) ids in configuration order.
    pub organizations: Vec<String>,
}
