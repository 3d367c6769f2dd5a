//! # Chaincode Lifecycle
//!
//! Decides which chaincode definition governs each namespace of a channel.
//! Organizations approve a definition in their private scope; once enough of
//! them agree, anyone may commit it publicly, advancing the namespace's
//! sequence by one.
//!
//! ## Sequence Rules
//!
//! | Operation | Accepted sequences | Enforcement |
//! |-----------|--------------------|-------------|
//! | Approve | committed (exact match required) or committed + 1 | `domain/invariants.rs` - `check_approval_sequence()` |
//! | Commit | committed + 1 only | `domain/invariants.rs` - `check_commit_sequence()` |
//!
//! ## State Layout
//!
//! | Scope | Namespace | Key | Record |
//! |-------|-----------|-----|--------|
//! | public | `namespaces` | `name` | `ChaincodeDefinition` |
//! | org private | `namespaces` | `name#seq` | `ChaincodeParameters` |
//! | org private | `chaincode-sources` | `name#seq` | `ChaincodeLocalPackage` |
//!
//! Records are stored field by field by [`serializer::Serializer`].
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `ChaincodeStore` | Installed package bytes and hashes |
//! | `PackageParser` | Install package validation |
//! | `InstallListener` | Post-install notification |
//! | `ChannelConfigSource` | Channel member organizations |
//!
//! ## Usage Example
//!
//! ```ignore
//! use chaincode_lifecycle::prelude::*;
//!
//! let lifecycle = LifecycleService::new(resources, LifecycleConfig::from_env()?);
//!
//! let mut org1_tx = org1_store.simulate();
//! lifecycle.approve_chaincode_definition_for_org("mycc", &def, Some(&hash), &public, &mut org1_tx)?;
//!
//! let mut public_tx = public.simulate();
//! let agreement = lifecycle.commit_chaincode_definition("mycc", &def, &mut public_tx, &[&org1, &org2])?;
//! ```

// Crate-level lints
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod resources;
pub mod serializer;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        ChaincodeDefinition, ChaincodeLocalPackage, ChaincodeMetadata, ChaincodePackage,
        ChaincodePackageMetadata, ChaincodeParameters, ChannelConfig, CollectionConfigPackage,
        EndorsementInfo, InstalledChaincode, StaticCollectionConfig, ValidationInfo,
    };

    // Value objects
    pub use crate::domain::value_objects::{
        private_key, Datatype, PackageId, CHAINCODE_SOURCES_NAME, LIFECYCLE_NAMESPACE,
        NAMESPACES_NAME,
    };

    // Ports
    pub use crate::ports::inbound::ChaincodeLifecycleApi;
    pub use crate::ports::outbound::{
        ChaincodeStore, ChannelConfigSource, InstallListener, PackageParser,
    };

    // Adapters
    pub use crate::adapters::{
        BincodePackageParser, InMemoryChaincodeStore, StaticChannelConfigSource,
    };

    // Errors
    pub use crate::errors::{
        ChaincodeStoreError, LifecycleError, PackageParseError, ParameterMismatch,
        SerializerError,
    };

    // Service
    pub use crate::config::{ConfigError, LifecycleConfig};
    pub use crate::resources::Resources;
    pub use crate::serializer::{Serializer, StateRecord, StaticMetadata};
    pub use crate::service::LifecycleService;
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
