//! # Driven Ports (SPI - Outbound)
//!
//! Collaborators the lifecycle depends on. All are shared behind `Arc` and
//! must be `Send + Sync`.

use crate::domain::entities::{
    ChaincodeMetadata, ChaincodePackage, ChaincodePackageMetadata, ChannelConfig,
    InstalledChaincode,
};
use crate::domain::value_objects::PackageId;
use crate::errors::{ChaincodeStoreError, PackageParseError};

// =============================================================================
// CHAINCODE STORE
// =============================================================================

/// Persistent store of installed packages, addressed by content hash.
pub trait ChaincodeStore: Send + Sync {
    /// Persist `package` as `name:version`, returning its content hash.
    ///
    /// Installing identical bytes again yields the same hash.
    fn save(&self, name: &str, version: &str, package: &[u8])
        -> Result<Vec<u8>, ChaincodeStoreError>;

    /// Hash of the package installed as `package_id`.
    fn retrieve_hash(&self, package_id: &PackageId) -> Result<Vec<u8>, ChaincodeStoreError>;

    /// Every installed `name:version`, ordered by package id.
    fn list_installed_chaincodes(&self) -> Result<Vec<InstalledChaincode>, ChaincodeStoreError>;

    /// Package bytes for `hash` and every `name:version` installed with it.
    fn load(&self, hash: &[u8])
        -> Result<(Vec<u8>, Vec<ChaincodeMetadata>), ChaincodeStoreError>;
}

// =============================================================================
// PACKAGE PARSER
// =============================================================================

/// Structural validation of install packages.
pub trait PackageParser: Send + Sync {
    /// Parse `bytes` into a package.
    fn parse(&self, bytes: &[u8]) -> Result<ChaincodePackage, PackageParseError>;
}

// =============================================================================
// INSTALL LISTENER
// =============================================================================

/// Notified after a package has been installed.
pub trait InstallListener: Send + Sync {
    /// Called once per successful install.
    fn handle_chaincode_installed(&self, metadata: &ChaincodePackageMetadata, hash: &[u8]);
}

impl<F> InstallListener for F
where
    F: Fn(&ChaincodePackageMetadata, &[u8]) + Send + Sync,
{
    fn handle_chaincode_installed(&self, metadata: &ChaincodePackageMetadata, hash: &[u8]) {
        self(metadata, hash);
    }
}

// =============================================================================
// CHANNEL CONFIG
// =============================================================================

/// Source of channel configuration.
pub trait ChannelConfigSource: Send + Sync {
    /// Current configuration of `channel_id`, or `None` if this peer does not
    /// know the channel.
    fn channel_config(&self, channel_id: &str) -> Option<ChannelConfig>;
}
