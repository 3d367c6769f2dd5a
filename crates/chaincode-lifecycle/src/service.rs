//! # Lifecycle Service
//!
//! Implements [`ChaincodeLifecycleApi`] over a [`Resources`] bundle.
//!
//! ## Flow
//!
//! ```text
//! approve (per org)                      commit (once, by any org)
//! ──────────────────                     ─────────────────────────
//! public Sequence ──► sequence rules     public Sequence ──► must be +1
//!        │                                      │
//!        ▼                                      ▼
//! org scope: namespaces/name#seq         each org scope: is name#seq == params?
//!            chaincode-sources/name#seq         │
//!                                               ▼
//!                                        public scope: namespaces/name
//! ```

use crate::config::LifecycleConfig;
use crate::domain::entities::{
    ChaincodeDefinition, ChaincodeLocalPackage, ChaincodeParameters, InstalledChaincode,
};
use crate::domain::invariants::{check_approval_sequence, check_commit_sequence, ApprovalKind};
use crate::domain::value_objects::{
    private_key, Datatype, PackageId, CHAINCODE_SOURCES_NAME, NAMESPACES_NAME, SEQUENCE_FIELD,
};
use crate::errors::LifecycleError;
use crate::ports::inbound::ChaincodeLifecycleApi;
use crate::ports::outbound::InstallListener;
use crate::resources::Resources;
use ledger_state::{RangeableState, ReadWritableState, ReadableState};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// The chaincode lifecycle engine.
pub struct LifecycleService {
    resources: Resources,
    install_listener: Option<Arc<dyn InstallListener>>,
    config: LifecycleConfig,
}

impl LifecycleService {
    /// Create a service; the reserved namespace is taken from `config`.
    pub fn new(resources: Resources, config: LifecycleConfig) -> Self {
        let resources = resources.with_lifecycle_namespace(config.lifecycle_namespace.clone());
        Self {
            resources,
            install_listener: None,
            config,
        }
    }

    /// Notify `listener` after every successful install.
    #[must_use]
    pub fn with_install_listener(mut self, listener: Arc<dyn InstallListener>) -> Self {
        self.install_listener = Some(listener);
        self
    }

    /// The shared resources.
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// The active configuration.
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Publicly committed sequence of `name`; 0 if never committed.
    pub fn current_sequence<S>(&self, name: &str, public_state: &S) -> Result<i64, LifecycleError>
    where
        S: ReadableState + ?Sized,
    {
        self.resources
            .serializer
            .deserialize_field_as_int64(NAMESPACES_NAME, name, SEQUENCE_FIELD, public_state)
            .map_err(LifecycleError::serializer("could not get current sequence"))
    }

    /// Whether each org approved `parameters` for `name` at `sequence`.
    ///
    /// An org whose record cannot be read or decoded counts as not agreeing.
    fn agreement(
        &self,
        name: &str,
        sequence: i64,
        parameters: &ChaincodeParameters,
        org_states: &[&dyn ReadableState],
    ) -> Vec<bool> {
        let key = private_key(name, sequence);
        org_states
            .iter()
            .enumerate()
            .map(|(org_index, org_state)| {
                match self
                    .resources
                    .serializer
                    .is_serialized(NAMESPACES_NAME, &key, parameters, *org_state)
                {
                    Ok(matches) => matches,
                    Err(e) => {
                        debug!(
                            namespace = name,
                            sequence,
                            org_index,
                            error = %e,
                            "Could not read org approval, counting as disagreement"
                        );
                        false
                    }
                }
            })
            .collect()
    }

    /// Validate a commit of `definition` and compute agreement.
    fn prepare_commit<S>(
        &self,
        name: &str,
        definition: &ChaincodeDefinition,
        public_state: &S,
        org_states: &[&dyn ReadableState],
    ) -> Result<Vec<bool>, LifecycleError>
    where
        S: ReadableState + ?Sized,
    {
        let current = self.current_sequence(name, public_state)?;
        check_commit_sequence(current, definition.sequence)?;

        Ok(self.agreement(
            name,
            definition.sequence,
            &definition.parameters(),
            org_states,
        ))
    }

    /// Committed definition at `sequence`, which must exist.
    fn committed_definition(
        &self,
        name: &str,
        sequence: i64,
        public_state: &dyn ReadableState,
    ) -> Result<ChaincodeDefinition, LifecycleError> {
        let serializer = &self.resources.serializer;
        let metadata = serializer
            .deserialize_metadata(NAMESPACES_NAME, name, public_state)
            .map_err(LifecycleError::serializer(format!(
                "could not fetch metadata for current definition for {name}"
            )))?
            .ok_or(LifecycleError::MissingCommittedDefinition { sequence })?;

        serializer
            .deserialize(NAMESPACES_NAME, name, &metadata, public_state)
            .map_err(LifecycleError::serializer(format!(
                "could not deserialize namespace {name} as chaincode"
            )))
    }
}

impl ChaincodeLifecycleApi for LifecycleService {
    #[instrument(skip_all, fields(namespace = name, sequence = definition.sequence))]
    fn approve_chaincode_definition_for_org(
        &self,
        name: &str,
        definition: &ChaincodeDefinition,
        local_package_hash: Option<&[u8]>,
        public_state: &dyn ReadableState,
        org_state: &mut dyn ReadWritableState,
    ) -> Result<(), LifecycleError> {
        let requested = definition.sequence;
        let current = self.current_sequence(name, public_state)?;
        let parameters = definition.parameters();

        if check_approval_sequence(current, requested)? == ApprovalKind::Reapproval {
            let committed = self.committed_definition(name, current, public_state)?;
            committed
                .parameters()
                .compare(&parameters)
                .map_err(|source| LifecycleError::DefinitionMismatch {
                    name: name.to_string(),
                    sequence: current,
                    source,
                })?;
        }

        let key = private_key(name, requested);
        let serializer = &self.resources.serializer;
        serializer
            .serialize(NAMESPACES_NAME, &key, &parameters, &mut *org_state)
            .map_err(LifecycleError::serializer(format!(
                "could not serialize chaincode parameters to state for {key}"
            )))?;

        if let Some(hash) = local_package_hash {
            let local_package = ChaincodeLocalPackage {
                hash: hash.to_vec(),
            };
            serializer
                .serialize(CHAINCODE_SOURCES_NAME, &key, &local_package, &mut *org_state)
                .map_err(LifecycleError::serializer(format!(
                    "could not serialize chaincode package info to state for {key}"
                )))?;
        }

        info!(
            current_sequence = current,
            with_package = local_package_hash.is_some(),
            "Approved chaincode definition for org"
        );
        Ok(())
    }

    #[instrument(skip_all, fields(namespace = name, sequence = definition.sequence, orgs = org_states.len()))]
    fn commit_chaincode_definition(
        &self,
        name: &str,
        definition: &ChaincodeDefinition,
        public_state: &mut dyn ReadWritableState,
        org_states: &[&dyn ReadableState],
    ) -> Result<Vec<bool>, LifecycleError> {
        let agreement = self.prepare_commit(name, definition, &*public_state, org_states)?;

        self.resources
            .serializer
            .serialize(NAMESPACES_NAME, name, definition, &mut *public_state)
            .map_err(LifecycleError::serializer(format!(
                "could not serialize chaincode definition for {name}"
            )))?;

        info!(
            approvals = agreement.iter().filter(|a| **a).count(),
            "Committed chaincode definition"
        );
        Ok(agreement)
    }

    #[instrument(skip_all, fields(namespace = name, sequence = definition.sequence))]
    fn check_commit_readiness(
        &self,
        name: &str,
        definition: &ChaincodeDefinition,
        public_state: &dyn ReadableState,
        org_states: &[&dyn ReadableState],
    ) -> Result<Vec<bool>, LifecycleError> {
        let agreement = self.prepare_commit(name, definition, public_state, org_states)?;
        debug!(?agreement, "Checked commit readiness");
        Ok(agreement)
    }

    fn query_chaincode_definition(
        &self,
        name: &str,
        public_state: &dyn ReadableState,
    ) -> Result<ChaincodeDefinition, LifecycleError> {
        let serializer = &self.resources.serializer;
        let metadata = serializer
            .deserialize_metadata(NAMESPACES_NAME, name, public_state)
            .map_err(LifecycleError::serializer(format!(
                "could not fetch metadata for namespace {name}"
            )))?
            .ok_or_else(|| LifecycleError::NamespaceNotDefined {
                name: name.to_string(),
            })?;

        if metadata.datatype() != Datatype::ChaincodeDefinition {
            return Err(LifecycleError::NotAChaincode {
                datatype: metadata.datatype,
            });
        }

        serializer
            .deserialize(NAMESPACES_NAME, name, &metadata, public_state)
            .map_err(LifecycleError::serializer(format!(
                "could not deserialize namespace {name} as chaincode"
            )))
    }

    fn query_namespace_definitions(
        &self,
        public_state: &dyn RangeableState,
    ) -> Result<BTreeMap<String, String>, LifecycleError> {
        let metadatas = self
            .resources
            .serializer
            .deserialize_all_metadata(NAMESPACES_NAME, public_state)
            .map_err(LifecycleError::serializer("could not query namespace metadata"))?;

        Ok(metadatas
            .into_iter()
            .map(|(key, metadata)| (key, metadata.datatype().friendly_name().to_string()))
            .collect())
    }

    fn query_approved_package_hash(
        &self,
        name: &str,
        sequence: i64,
        org_state: &dyn ReadableState,
    ) -> Result<Option<Vec<u8>>, LifecycleError> {
        let key = private_key(name, sequence);
        let serializer = &self.resources.serializer;
        let Some(metadata) = serializer
            .deserialize_metadata(CHAINCODE_SOURCES_NAME, &key, org_state)
            .map_err(LifecycleError::serializer(format!(
                "could not fetch package source metadata for {key}"
            )))?
        else {
            return Ok(None);
        };

        let local_package: ChaincodeLocalPackage = serializer
            .deserialize(CHAINCODE_SOURCES_NAME, &key, &metadata, org_state)
            .map_err(LifecycleError::serializer(format!(
                "could not deserialize package source for {key}"
            )))?;

        Ok(Some(local_package.hash))
    }

    #[instrument(skip(self, package), fields(size = package.len()))]
    fn install_chaincode(
        &self,
        name: &str,
        version: &str,
        package: &[u8],
    ) -> Result<Vec<u8>, LifecycleError> {
        if package.len() > self.config.max_package_bytes {
            return Err(LifecycleError::PackageTooLarge {
                size: package.len(),
                max: self.config.max_package_bytes,
            });
        }

        let parsed = self
            .resources
            .package_parser
            .parse(package)
            .map_err(LifecycleError::InvalidPackage)?;

        let hash = self
            .resources
            .chaincode_store
            .save(name, version, package)
            .map_err(LifecycleError::store("could not save cc install package"))?;

        if let Some(listener) = &self.install_listener {
            listener.handle_chaincode_installed(&parsed.metadata, &hash);
        }

        info!(
            hash = %hex::encode(&hash),
            chaincode_type = %parsed.metadata.chaincode_type,
            "Installed chaincode package"
        );
        Ok(hash)
    }

    fn query_installed_chaincode(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Vec<u8>, LifecycleError> {
        let package_id = PackageId::new(name, version);
        self.resources
            .chaincode_store
            .retrieve_hash(&package_id)
            .map_err(LifecycleError::store(format!(
                "could not retrieve hash for chaincode '{package_id}'"
            )))
    }

    fn query_installed_chaincodes(&self) -> Result<Vec<InstalledChaincode>, LifecycleError> {
        self.resources
            .chaincode_store
            .list_installed_chaincodes()
            .map_err(LifecycleError::store("could not list installed chaincodes"))
    }
}

impl std::fmt::Debug for LifecycleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleService")
            .field("resources", &self.resources)
            .field("install_listener", &self.install_listener.is_some())
            .field("config", &self.config)
            .finish()
    }
}
