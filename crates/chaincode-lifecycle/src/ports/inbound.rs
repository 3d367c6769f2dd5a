//! # Driving Port (API - Inbound)
//!
//! The operations the lifecycle system chaincode dispatches to. Every call
//! is a synchronous function of the state views it is handed; writes land in
//! those views and become durable only when the surrounding transaction
//! commits.

use crate::domain::entities::{ChaincodeDefinition, InstalledChaincode};
use crate::errors::LifecycleError;
use ledger_state::{RangeableState, ReadWritableState, ReadableState};
use std::collections::BTreeMap;

/// Primary API of the chaincode lifecycle.
///
/// ## Usage
///
/// ```ignore
/// lifecycle.approve_chaincode_definition_for_org("mycc", &def, Some(&hash), &public, &mut org)?;
/// let agreement = lifecycle.commit_chaincode_definition("mycc", &def, &mut public, &[&org1, &org2])?;
/// ```
pub trait ChaincodeLifecycleApi: Send + Sync {
    /// Record this org's approval of `definition` for namespace `name`.
    ///
    /// `definition.sequence` must be the committed sequence (re-approval, in
    /// which case the parameters must equal the committed ones) or the next
    /// one. The parameters are written to `org_state` at `name#sequence`,
    /// fully replacing any earlier approval. If `local_package_hash` is given
    /// the package source is recorded too; otherwise an existing one is left
    /// untouched.
    fn approve_chaincode_definition_for_org(
        &self,
        name: &str,
        definition: &ChaincodeDefinition,
        local_package_hash: Option<&[u8]>,
        public_state: &dyn ReadableState,
        org_state: &mut dyn ReadWritableState,
    ) -> Result<(), LifecycleError>;

    /// Commit `definition` as the public definition of `name`.
    ///
    /// `definition.sequence` must be exactly one past the committed sequence.
    /// Returns, for each of `org_states` in order, whether that org approved
    /// these exact parameters at this sequence. The definition is written
    /// whatever the agreement; enforcing an endorsement policy over it is
    /// the caller's job.
    fn commit_chaincode_definition(
        &self,
        name: &str,
        definition: &ChaincodeDefinition,
        public_state: &mut dyn ReadWritableState,
        org_states: &[&dyn ReadableState],
    ) -> Result<Vec<bool>, LifecycleError>;

    /// Same validation and agreement as
    /// [`commit_chaincode_definition`](Self::commit_chaincode_definition),
    /// without writing anything.
    fn check_commit_readiness(
        &self,
        name: &str,
        definition: &ChaincodeDefinition,
        public_state: &dyn ReadableState,
        org_states: &[&dyn ReadableState],
    ) -> Result<Vec<bool>, LifecycleError>;

    /// The committed definition of `name`.
    ///
    /// # Errors
    ///
    /// `NamespaceNotDefined` if nothing is committed under `name`.
    fn query_chaincode_definition(
        &self,
        name: &str,
        public_state: &dyn ReadableState,
    ) -> Result<ChaincodeDefinition, LifecycleError>;

    /// Every publicly defined namespace with a human-facing type label.
    fn query_namespace_definitions(
        &self,
        public_state: &dyn RangeableState,
    ) -> Result<BTreeMap<String, String>, LifecycleError>;

    /// Package hash this org recorded with its approval of `name#sequence`.
    fn query_approved_package_hash(
        &self,
        name: &str,
        sequence: i64,
        org_state: &dyn ReadableState,
    ) -> Result<Option<Vec<u8>>, LifecycleError>;

    /// Install a chaincode package on this peer, returning its content hash.
    fn install_chaincode(
        &self,
        name: &str,
        version: &str,
        package: &[u8],
    ) -> Result<Vec<u8>, LifecycleError>;

    /// Hash of the package installed as `name:version`.
    fn query_installed_chaincode(&self, name: &str, version: &str)
        -> Result<Vec<u8>, LifecycleError>;

    /// Every installed `name:version` and its hash.
    fn query_installed_chaincodes(&self) -> Result<Vec<InstalledChaincode>, LifecycleError>;
}
