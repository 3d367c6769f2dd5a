//! # Record Codec
//!
//! Stores a typed record as one state entry per field plus a metadata entry,
//! under a two-level `(namespace, key)` name:
//!
//! ```text
//! <namespace>/metadata/<key>          -> StaticMetadata (bincode)
//! <namespace>/fields/<key>/<Field>    -> field value (JSON)
//! ```
//!
//! For instance, after one commit and one org approval:
//!
//! ```text
//! public:   namespaces/metadata/mycc               ChaincodeDefinition
//!           namespaces/fields/mycc/Sequence        1
//!           namespaces/fields/mycc/EndorsementInfo {"Version":"1.0",...}
//! org:      namespaces/metadata/mycc#1             ChaincodeParameters
//!           namespaces/fields/mycc#1/...
//!           chaincode-sources/metadata/mycc#1      LocalPackage
//!           chaincode-sources/fields/mycc#1/Hash   [..]
//! ```
//!
//! Field-level storage lets a stored record be compared against a candidate
//! entry by entry (`is_serialized`) and a single field be read without
//! decoding the whole record (`deserialize_field_as_int64`).

mod metadata;

pub use metadata::StaticMetadata;

use crate::domain::value_objects::Datatype;
use crate::errors::SerializerError;
use ledger_state::{OpaqueState, RangeableState, ReadableState};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A record the codec can store.
pub trait StateRecord: Serialize + DeserializeOwned {
    /// Tag written into the record's metadata.
    const DATATYPE: Datatype;
}

fn metadata_prefix(namespace: &str) -> String {
    format!("{namespace}/metadata/")
}

fn metadata_key(namespace: &str, key: &str) -> String {
    format!("{namespace}/metadata/{key}")
}

fn field_key(namespace: &str, key: &str, field: &str) -> String {
    format!("{namespace}/fields/{key}/{field}")
}

/// Field-by-field record codec over the state capabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct Serializer;

impl Serializer {
    /// Create a codec.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn marshal<R: StateRecord>(
        &self,
        record: &R,
    ) -> Result<(StaticMetadata, Vec<(String, Vec<u8>)>), SerializerError> {
        let datatype = R::DATATYPE.as_str().to_string();
        let value = serde_json::to_value(record).map_err(|e| SerializerError::Encode {
            datatype: datatype.clone(),
            reason: e.to_string(),
        })?;
        let Value::Object(object) = value else {
            return Err(SerializerError::NotAStruct { datatype });
        };

        let mut fields = Vec::with_capacity(object.len());
        for (name, value) in object {
            let bytes = serde_json::to_vec(&value).map_err(|e| SerializerError::Encode {
                datatype: datatype.clone(),
                reason: e.to_string(),
            })?;
            fields.push((name, bytes));
        }

        let metadata = StaticMetadata {
            datatype,
            fields: fields.iter().map(|(name, _)| name.clone()).collect(),
        };
        Ok((metadata, fields))
    }

    fn encode_metadata(metadata: &StaticMetadata) -> Result<Vec<u8>, SerializerError> {
        metadata.encode().map_err(|reason| SerializerError::Encode {
            datatype: metadata.datatype.clone(),
            reason,
        })
    }

    /// Write `record` at `namespace`/`key`, overwriting every field.
    ///
    /// Only write access is needed, so a foreign org's opaque scope can be
    /// populated without being readable.
    pub fn serialize<R, S>(
        &self,
        namespace: &str,
        key: &str,
        record: &R,
        state: &mut S,
    ) -> Result<(), SerializerError>
    where
        R: StateRecord,
        S: OpaqueState + ?Sized,
    {
        let (metadata, fields) = self.marshal(record)?;
        let metadata_bytes = Self::encode_metadata(&metadata)?;

        for (field, bytes) in fields {
            state.put_state(&field_key(namespace, key, &field), bytes)?;
        }
        state.put_state(&metadata_key(namespace, key), metadata_bytes)?;

        Ok(())
    }

    /// Read the metadata at `namespace`/`key`; `None` if nothing was stored.
    pub fn deserialize_metadata<S>(
        &self,
        namespace: &str,
        key: &str,
        state: &S,
    ) -> Result<Option<StaticMetadata>, SerializerError>
    where
        S: ReadableState + ?Sized,
    {
        let metadata_key = metadata_key(namespace, key);
        match state.get_state(&metadata_key)? {
            None => Ok(None),
            Some(bytes) => StaticMetadata::decode(&bytes)
                .map(Some)
                .map_err(|reason| SerializerError::CorruptMetadata {
                    key: metadata_key,
                    reason,
                }),
        }
    }

    /// Decode the record described by `metadata`.
    ///
    /// Fails if the stored datatype is not `R::DATATYPE`.
    pub fn deserialize<R, S>(
        &self,
        namespace: &str,
        key: &str,
        metadata: &StaticMetadata,
        state: &S,
    ) -> Result<R, SerializerError>
    where
        R: StateRecord,
        S: ReadableState + ?Sized,
    {
        if metadata.datatype() != R::DATATYPE {
            return Err(SerializerError::TypeMismatch {
                expected: R::DATATYPE.to_string(),
                found: metadata.datatype.clone(),
            });
        }

        let mut object = Map::new();
        for field in &metadata.fields {
            let bytes = state
                .get_state(&field_key(namespace, key, field))?
                .ok_or_else(|| SerializerError::MissingField {
                    key: key.to_string(),
                    field: field.clone(),
                })?;
            let value: Value =
                serde_json::from_slice(&bytes).map_err(|e| SerializerError::CorruptField {
                    key: key.to_string(),
                    field: field.clone(),
                    reason: e.to_string(),
                })?;
            object.insert(field.clone(), value);
        }

        serde_json::from_value(Value::Object(object)).map_err(|e| SerializerError::Decode {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    /// Metadata of every record in `namespace`, keyed by record key.
    pub fn deserialize_all_metadata<S>(
        &self,
        namespace: &str,
        state: &S,
    ) -> Result<BTreeMap<String, StaticMetadata>, SerializerError>
    where
        S: RangeableState + ?Sized,
    {
        let prefix = metadata_prefix(namespace);
        let mut result = BTreeMap::new();
        for (full_key, bytes) in state.get_state_range(&prefix)? {
            let Some(key) = full_key.strip_prefix(&prefix) else {
                continue;
            };
            let metadata =
                StaticMetadata::decode(&bytes).map_err(|reason| SerializerError::CorruptMetadata {
                    key: full_key.clone(),
                    reason,
                })?;
            result.insert(key.to_string(), metadata);
        }
        Ok(result)
    }

    /// Read a single integer field; 0 if it was never written.
    pub fn deserialize_field_as_int64<S>(
        &self,
        namespace: &str,
        key: &str,
        field: &str,
        state: &S,
    ) -> Result<i64, SerializerError>
    where
        S: ReadableState + ?Sized,
    {
        match state.get_state(&field_key(namespace, key, field))? {
            None => Ok(0),
            Some(bytes) => serde_json::from_slice(&bytes).map_err(|e| SerializerError::CorruptField {
                key: key.to_string(),
                field: field.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Whether `namespace`/`key` currently holds exactly `record`.
    ///
    /// Compares metadata and every field byte for byte without decoding the
    /// stored record. A missing record is `Ok(false)`.
    pub fn is_serialized<R, S>(
        &self,
        namespace: &str,
        key: &str,
        record: &R,
        state: &S,
    ) -> Result<bool, SerializerError>
    where
        R: StateRecord,
        S: ReadableState + ?Sized,
    {
        let (metadata, fields) = self.marshal(record)?;

        let Some(stored_metadata) = state.get_state(&metadata_key(namespace, key))? else {
            return Ok(false);
        };
        if stored_metadata != Self::encode_metadata(&metadata)? {
            return Ok(false);
        }

        for (field, bytes) in fields {
            let stored = state.get_state(&field_key(namespace, key, &field))?;
            if stored.as_deref() != Some(bytes.as_slice()) {
                return Ok(false);
            }
        }

        Ok(true)
    }
}
