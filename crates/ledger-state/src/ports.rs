//! # State Ports
//!
//! Narrow capability traits over a keyed store. Implementations are supplied
//! by the surrounding transaction execution engine; `crate::adapters` holds
//! the in-memory ones.

use crate::errors::StateError;

/// A `(key, value)` pair returned by range queries.
pub type StateEntry = (String, Vec<u8>);

/// Read access to a single key.
pub trait ReadableState {
    /// Get the value stored at `key`, or `None` if the key was never written.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StateError>;
}

/// Write-only access.
///
/// Used for scopes the caller is not allowed to read, such as another
/// organization's private data.
pub trait OpaqueState {
    /// Overwrite the value stored at `key`.
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StateError>;
}

/// Read and write access to the same scope.
pub trait ReadWritableState: ReadableState + OpaqueState {}

impl<T: ReadableState + OpaqueState + ?Sized> ReadWritableState for T {}

/// Read access plus ordered iteration over a key prefix.
pub trait RangeableState: ReadableState {
    /// All entries whose key starts with `prefix`, in ascending key order.
    fn get_state_range(&self, prefix: &str) -> Result<Vec<StateEntry>, StateError>;
}
