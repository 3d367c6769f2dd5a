//! # Channel Fixture
//!
//! A channel with one public store and one private store per organization.
//! Every operation runs against `simulate()` views and applies its write set
//! only on success, the way a peer commits a validated transaction.

use chaincode_lifecycle::prelude::*;
use ledger_state::{MemoryStore, ReadableState};
use lifecycle_telemetry::{init_tracing, log_lifecycle_event, TelemetryConfig};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Channel id used by every fixture.
pub const CHANNEL: &str = "mychannel";

/// Install the global subscriber once; later calls are no-ops.
pub fn init_test_logging() {
    let config = TelemetryConfig {
        log_level: "debug".to_string(),
        console_output: false,
        ..Default::default()
    };
    let _ = init_tracing(&config);
}

/// Parameters with the given version and policy bytes.
pub fn parameters(version: &str, policy: &[u8]) -> ChaincodeParameters {
    ChaincodeParameters::new(
        EndorsementInfo {
            version: version.to_string(),
            endorsement_plugin: "escc".to_string(),
            init_required: true,
        },
        ValidationInfo {
            validation_plugin: "vscc".to_string(),
            validation_parameter: policy.to_vec(),
        },
        CollectionConfigPackage::default(),
    )
}

/// A well-formed install package.
pub fn install_package(path: &str) -> Vec<u8> {
    BincodePackageParser::encode(&ChaincodePackage {
        metadata: ChaincodePackageMetadata {
            chaincode_type: "golang".to_string(),
            path: path.to_string(),
        },
        code_package: path.as_bytes().to_vec(),
    })
    .expect("package encodes")
}

/// Simulated channel.
pub struct Channel {
    pub lifecycle: LifecycleService,
    pub public: MemoryStore,
    pub orgs: BTreeMap<String, MemoryStore>,
}

impl Channel {
    /// Channel whose members are `orgs`, in configuration order.
    pub fn new(orgs: &[&str]) -> Self {
        init_test_logging();
        let resources = Resources::new(
            Arc::new(StaticChannelConfigSource::new().with_channel(CHANNEL, orgs.iter().copied())),
            Arc::new(InMemoryChaincodeStore::new()),
            Arc::new(BincodePackageParser::new()),
        );
        Self {
            lifecycle: LifecycleService::new(resources, LifecycleConfig::default()),
            public: MemoryStore::new(),
            orgs: orgs
                .iter()
                .map(|org| (org.to_string(), MemoryStore::new()))
                .collect(),
        }
    }

    /// Private store of `org`.
    pub fn org(&self, org: &str) -> &MemoryStore {
        &self.orgs[org]
    }

    /// Approve `definition` as `org`, applying the writes on success.
    pub fn approve(
        &self,
        org: &str,
        name: &str,
        definition: &ChaincodeDefinition,
        hash: Option<&[u8]>,
    ) -> Result<(), LifecycleError> {
        let store = self.org(org);
        let mut tx = store.simulate();
        self.lifecycle.approve_chaincode_definition_for_org(
            name,
            definition,
            hash,
            &self.public,
            &mut tx,
        )?;
        store.apply(tx.into_write_set());
        log_lifecycle_event!(debug, "Fixture approval applied", name, definition.sequence, org = org);
        Ok(())
    }

    /// Commit `definition`, checking agreement of every channel member.
    pub fn commit(
        &self,
        name: &str,
        definition: &ChaincodeDefinition,
    ) -> Result<Vec<bool>, LifecycleError> {
        let members = self.lifecycle.resources().channel_organizations(CHANNEL)?;
        let org_states: Vec<&dyn ReadableState> = members
            .iter()
            .map(|msp| self.org(msp) as &dyn ReadableState)
            .collect();

        let mut tx = self.public.simulate();
        let agreement = self.lifecycle.commit_chaincode_definition(
            name,
            definition,
            &mut tx,
            &org_states,
        )?;
        self.public.apply(tx.into_write_set());
        log_lifecycle_event!(
            debug,
            "Fixture commit applied",
            name,
            definition.sequence,
            approvals = agreement.iter().filter(|a| **a).count()
        );
        Ok(agreement)
    }

    /// Committed sequence of `name`.
    pub fn sequence(&self, name: &str) -> i64 {
        self.lifecycle
            .current_sequence(name, &self.public)
            .expect("sequence readable")
    }
}
