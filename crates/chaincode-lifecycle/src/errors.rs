//! # Error Types
//!
//! All error types for the chaincode lifecycle.
//!
//! Validation failures are returned as descriptive variants of
//! [`LifecycleError`]. Collaborator failures (codec, package store) are
//! wrapped with a context string naming the operation and namespace.

use crate::domain::value_objects::PackageId;
use ledger_state::StateError;
use thiserror::Error;

// =============================================================================
// LIFECYCLE ERRORS
// =============================================================================

/// Errors returned by lifecycle operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// Sequence 0 can never be approved.
    #[error("requested sequence is 0, but first definable sequence number is 1")]
    ZeroSequence,

    /// Approval for a sequence older than the committed one.
    #[error("currently defined sequence {current} is larger than requested sequence {requested}")]
    SequenceSuperseded {
        /// Publicly committed sequence
        current: i64,
        /// Sequence in the request
        requested: i64,
    },

    /// Approval that skips past the next committable sequence.
    #[error("requested sequence {requested} is larger than the next available sequence number {next}")]
    SequenceTooHigh {
        /// Sequence in the request
        requested: i64,
        /// Next committable sequence
        next: i64,
    },

    /// Commit for anything other than the next sequence.
    #[error("requested sequence is {requested}, but new definition must be sequence {expected}")]
    CommitSequenceMismatch {
        /// Sequence in the request
        requested: i64,
        /// Next committable sequence
        expected: i64,
    },

    /// The committed sequence cannot be advanced further.
    #[error("sequence {current} cannot be advanced")]
    SequenceOverflow {
        /// Publicly committed sequence
        current: i64,
    },

    /// Re-approval of the committed sequence with different parameters.
    #[error("attempted to define the current sequence ({sequence}) for namespace {name}, but {source}")]
    DefinitionMismatch {
        /// Namespace
        name: String,
        /// Committed sequence
        sequence: i64,
        /// First differing parameter
        source: ParameterMismatch,
    },

    /// Public sequence is set but the definition record is gone.
    #[error("missing metadata for currently committed sequence number ({sequence})")]
    MissingCommittedDefinition {
        /// Publicly committed sequence
        sequence: i64,
    },

    /// The namespace holds a record of another datatype.
    #[error("not a chaincode type: {datatype}")]
    NotAChaincode {
        /// Stored type tag
        datatype: String,
    },

    /// The namespace has no public definition.
    #[error("namespace {name} is not defined")]
    NamespaceNotDefined {
        /// Namespace
        name: String,
    },

    /// Install package over the configured size limit.
    #[error("chaincode install package of {size} bytes exceeds the {max} byte limit")]
    PackageTooLarge {
        /// Package size
        size: usize,
        /// Configured limit
        max: usize,
    },

    /// Install package failed structural validation.
    #[error("could not parse as a chaincode install package: {0}")]
    InvalidPackage(#[source] PackageParseError),

    /// No channel configuration for the channel.
    #[error("channel {0} is not known to this peer")]
    UnknownChannel(String),

    /// Record codec failure.
    #[error("{context}: {source}")]
    Serializer {
        /// Operation and key being processed
        context: String,
        /// Underlying codec error
        source: SerializerError,
    },

    /// Package store failure.
    #[error("{context}: {source}")]
    ChaincodeStore {
        /// Operation being performed
        context: String,
        /// Underlying store error
        source: ChaincodeStoreError,
    },
}

impl LifecycleError {
    /// Adapter for `map_err` that wraps a codec error with `context`.
    pub fn serializer(context: impl Into<String>) -> impl FnOnce(SerializerError) -> Self {
        let context = context.into();
        move |source| Self::Serializer { context, source }
    }

    /// Adapter for `map_err` that wraps a package store error with `context`.
    pub fn store(context: impl Into<String>) -> impl FnOnce(ChaincodeStoreError) -> Self {
        let context = context.into();
        move |source| Self::ChaincodeStore { context, source }
    }

    /// Returns true for errors caused by the request rather than by storage.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Serializer { .. } | Self::ChaincodeStore { .. })
    }
}

// =============================================================================
// PARAMETER MISMATCH
// =============================================================================

/// First field in which two sets of chaincode parameters differ.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParameterMismatch {
    /// Endorsement version differs.
    #[error("Version '{ours}' != '{theirs}'")]
    Version { ours: String, theirs: String },

    /// Endorsement plugin differs.
    #[error("EndorsementPlugin '{ours}' != '{theirs}'")]
    EndorsementPlugin { ours: String, theirs: String },

    /// Init requirement differs.
    #[error("InitRequired '{ours}' != '{theirs}'")]
    InitRequired { ours: bool, theirs: bool },

    /// Validation plugin differs.
    #[error("ValidationPlugin '{ours}' != '{theirs}'")]
    ValidationPlugin { ours: String, theirs: String },

    /// Validation policy bytes differ.
    #[error("ValidationParameter '{}' != '{}'", hex::encode(.ours), hex::encode(.theirs))]
    ValidationParameter { ours: Vec<u8>, theirs: Vec<u8> },

    /// Collection configuration differs.
    #[error("Collections do not match")]
    Collections,
}

// =============================================================================
// SERIALIZER ERRORS
// =============================================================================

/// Errors from the record codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializerError {
    /// State read or write failed.
    #[error(transparent)]
    State(#[from] StateError),

    /// Record could not be encoded.
    #[error("could not encode {datatype}: {reason}")]
    Encode { datatype: String, reason: String },

    /// Records must encode as structs with named fields.
    #[error("{datatype} does not encode as a struct")]
    NotAStruct { datatype: String },

    /// Metadata bytes could not be decoded.
    #[error("corrupt metadata at '{key}': {reason}")]
    CorruptMetadata { key: String, reason: String },

    /// Metadata lists a field that has no stored value.
    #[error("missing field '{field}' for '{key}'")]
    MissingField { key: String, field: String },

    /// Stored field value could not be decoded.
    #[error("corrupt field '{field}' for '{key}': {reason}")]
    CorruptField {
        key: String,
        field: String,
        reason: String,
    },

    /// Fields decoded but did not form the requested record.
    #[error("could not decode '{key}': {reason}")]
    Decode { key: String, reason: String },

    /// Stored datatype differs from the requested record type.
    #[error("type name mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
}

// =============================================================================
// COLLABORATOR ERRORS
// =============================================================================

/// Errors from the installed package store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChaincodeStoreError {
    /// No package installed under this id.
    #[error("chaincode {0} is not installed")]
    NotInstalled(PackageId),

    /// No package stored with this hash.
    #[error("no chaincode package with hash {0}")]
    UnknownHash(String),

    /// Name or version is unusable as a package id.
    #[error("invalid package id: {0}")]
    InvalidPackageId(String),

    /// Underlying storage failed.
    #[error("package storage failure: {0}")]
    Storage(String),
}

/// Errors from install package parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PackageParseError {
    /// Bytes are not a package envelope.
    #[error("malformed package: {0}")]
    Malformed(String),

    /// Required metadata is empty.
    #[error("package metadata is missing {0}")]
    MissingMetadata(&'static str),

    /// Package carries no code payload.
    #[error("package contains no code")]
    EmptyCode,
}
