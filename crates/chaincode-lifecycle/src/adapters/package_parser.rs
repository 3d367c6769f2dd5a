//! # Bincode Package Parser
//!
//! Install packages are a bincode-encoded [`ChaincodePackage`].

use crate::domain::entities::ChaincodePackage;
use crate::errors::PackageParseError;
use crate::ports::outbound::PackageParser;

/// Parses bincode-encoded install packages.
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodePackageParser;

impl BincodePackageParser {
    /// Create a parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Encode `package` in the format [`parse`](PackageParser::parse) accepts.
    pub fn encode(package: &ChaincodePackage) -> Result<Vec<u8>, PackageParseError> {
        bincode::serialize(package).map_err(|e| PackageParseError::Malformed(e.to_string()))
    }
}

impl PackageParser for BincodePackageParser {
    fn parse(&self, bytes: &[u8]) -> Result<ChaincodePackage, PackageParseError> {
        let package: ChaincodePackage = bincode::deserialize(bytes)
            .map_err(|e| PackageParseError::Malformed(e.to_string()))?;

        if package.metadata.chaincode_type.is_empty() {
            return Err(PackageParseError::MissingMetadata("type"));
        }
        if package.metadata.path.is_empty() {
            return Err(PackageParseError::MissingMetadata("path"));
        }
        if package.code_package.is_empty() {
            return Err(PackageParseError::EmptyCode);
        }

        Ok(package)
    }
}
