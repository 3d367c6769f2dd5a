//! # Resource Bundle
//!
//! Collaborators shared by every lifecycle operation, plus the derived
//! definition lookup other peer components use to find out whether a
//! namespace is defined.

use crate::domain::entities::ChaincodeDefinition;
use crate::domain::value_objects::{Datatype, LIFECYCLE_NAMESPACE, NAMESPACES_NAME};
use crate::errors::LifecycleError;
use crate::ports::outbound::{ChaincodeStore, ChannelConfigSource, PackageParser};
use crate::serializer::Serializer;
use ledger_state::ReadableState;
use std::sync::Arc;
use tracing::debug;

/// Shared collaborators of the lifecycle engine.
#[derive(Clone)]
pub struct Resources {
    /// Channel configuration lookups.
    pub channel_config_source: Arc<dyn ChannelConfigSource>,
    /// Installed package storage.
    pub chaincode_store: Arc<dyn ChaincodeStore>,
    /// Install package validation.
    pub package_parser: Arc<dyn PackageParser>,
    /// Record codec.
    pub serializer: Serializer,
    lifecycle_namespace: String,
}

impl Resources {
    /// Bundle the collaborators.
    pub fn new(
        channel_config_source: Arc<dyn ChannelConfigSource>,
        chaincode_store: Arc<dyn ChaincodeStore>,
        package_parser: Arc<dyn PackageParser>,
    ) -> Self {
        Self {
            channel_config_source,
            chaincode_store,
            package_parser,
            serializer: Serializer::new(),
            lifecycle_namespace: LIFECYCLE_NAMESPACE.to_string(),
        }
    }

    /// Use `namespace` as the reserved lifecycle namespace.
    #[must_use]
    pub fn with_lifecycle_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.lifecycle_namespace = namespace.into();
        self
    }

    /// The reserved lifecycle namespace.
    pub fn lifecycle_namespace(&self) -> &str {
        &self.lifecycle_namespace
    }

    /// The committed definition of `name`, or `None` if it has none.
    ///
    /// The lifecycle namespace is always defined, with no endorsement or
    /// validation requirements. A corrupt record is an error, never `None`.
    pub fn chaincode_definition_if_defined(
        &self,
        name: &str,
        public_state: &dyn ReadableState,
    ) -> Result<Option<ChaincodeDefinition>, LifecycleError> {
        if name == self.lifecycle_namespace {
            return Ok(Some(ChaincodeDefinition::implicit_lifecycle()));
        }

        let metadata = self
            .serializer
            .deserialize_metadata(NAMESPACES_NAME, name, public_state)
            .map_err(LifecycleError::serializer(format!(
                "could not deserialize metadata for chaincode {name}"
            )))?;

        let Some(metadata) = metadata else {
            debug!(namespace = name, "Namespace has no definition");
            return Ok(None);
        };

        if metadata.datatype() != Datatype::ChaincodeDefinition {
            return Err(LifecycleError::NotAChaincode {
                datatype: metadata.datatype,
            });
        }

        let definition = self
            .serializer
            .deserialize(NAMESPACES_NAME, name, &metadata, public_state)
            .map_err(LifecycleError::serializer(format!(
                "could not deserialize chaincode definition for chaincode {name}"
            )))?;

        Ok(Some(definition))
    }

    /// Member organizations of `channel_id`, in configuration order.
    pub fn channel_organizations(&self, channel_id: &str) -> Result<Vec<String>, LifecycleError> {
        self.channel_config_source
            .channel_config(channel_id)
            .map(|config| config.organizations)
            .ok_or_else(|| LifecycleError::UnknownChannel(channel_id.to_string()))
    }
}

impl std::fmt::Debug for Resources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resources")
            .field("lifecycle_namespace", &self.lifecycle_namespace)
            .finish_non_exhaustive()
    }
}
