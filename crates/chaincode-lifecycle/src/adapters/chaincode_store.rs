//! # In-Memory Chaincode Store
//!
//! Packages are addressed by the SHA-256 of their bytes. Several
//! `name:version` ids may point at the same package.

use crate::domain::entities::{ChaincodeMetadata, InstalledChaincode};
use crate::domain::value_objects::PackageId;
use crate::errors::ChaincodeStoreError;
use crate::ports::outbound::ChaincodeStore;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Debug, Default)]
struct Inner {
    /// Package bytes by hex hash.
    packages: HashMap<String, Vec<u8>>,
    /// Installed ids.
    installed: BTreeMap<PackageId, InstalledChaincode>,
}

/// Content-addressed package store held in memory.
#[derive(Debug, Default)]
pub struct InMemoryChaincodeStore {
    inner: RwLock<Inner>,
}

impl InMemoryChaincodeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct packages stored.
    #[must_use]
    pub fn package_count(&self) -> usize {
        self.inner.read().packages.len()
    }
}

/// SHA-256 of `bytes`.
#[must_use]
pub fn package_hash(bytes: &[u8]) -> Vec<u8> {
    Sha256::digest(bytes).to_vec()
}

impl ChaincodeStore for InMemoryChaincodeStore {
    fn save(
        &self,
        name: &str,
        version: &str,
        package: &[u8],
    ) -> Result<Vec<u8>, ChaincodeStoreError> {
        if name.is_empty() || version.is_empty() {
            return Err(ChaincodeStoreError::InvalidPackageId(format!(
                "{name}:{version}"
            )));
        }

        let hash = package_hash(package);
        let package_id = PackageId::new(name, version);

        let mut inner = self.inner.write();
        inner
            .packages
            .entry(hex::encode(&hash))
            .or_insert_with(|| package.to_vec());
        inner.installed.insert(
            package_id.clone(),
            InstalledChaincode {
                name: name.to_string(),
                version: version.to_string(),
                hash: hash.clone(),
            },
        );

        debug!(package_id = %package_id, hash = %hex::encode(&hash), "Stored chaincode package");
        Ok(hash)
    }

    fn retrieve_hash(&self, package_id: &PackageId) -> Result<Vec<u8>, ChaincodeStoreError> {
        self.inner
            .read()
            .installed
            .get(package_id)
            .map(|installed| installed.hash.clone())
            .ok_or_else(|| ChaincodeStoreError::NotInstalled(package_id.clone()))
    }

    fn list_installed_chaincodes(&self) -> Result<Vec<InstalledChaincode>, ChaincodeStoreError> {
        Ok(self.inner.read().installed.values().cloned().collect())
    }

    fn load(&self, hash: &[u8]) -> Result<(Vec<u8>, Vec<ChaincodeMetadata>), ChaincodeStoreError> {
        let hex_hash = hex::encode(hash);
        let inner = self.inner.read();
        let bytes = inner
            .packages
            .get(&hex_hash)
            .cloned()
            .ok_or(ChaincodeStoreError::UnknownHash(hex_hash))?;

        let metadata = inner
            .installed
            .values()
            .filter(|installed| installed.hash == hash)
            .map(|installed| ChaincodeMetadata {
                name: installed.name.clone(),
                version: installed.version.clone(),
            })
            .collect();

        Ok((bytes, metadata))
    }
}
