use crate::domain::value_objects::Datatype;
use serde::{Deserialize, Serialize};

/// Metadata stored alongside every record: its type tag and the names of the
/// fields written for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticMetadata {
    /// Raw type tag.
    pub datatype: String,
    /// Field names in encoding order.
    pub fields: Vec<String>,
}

impl StaticMetadata {
    /// Parsed type tag.
    #[must_use]
    pub fn datatype(&self) -> Datatype {
        Datatype::from_tag(&self.datatype)
    }

    pub(crate) fn encode(&self) -> Result<Vec<u8>, String> {
        bincode::serialize(self).map_err(|e| e.to_string())
    }

    pub(crate) fn decode(bytes: &[u8]) -> Result<Self, String> {
        bincode::deserialize(bytes).map_err(|e| e.to_string())
    }
}
