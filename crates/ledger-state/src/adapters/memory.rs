use crate::errors::StateError;
use crate::ports::{OpaqueState, RangeableState, ReadableState, StateEntry};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Buffered writes produced by one simulated transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSet {
    writes: BTreeMap<String, Vec<u8>>,
}

impl WriteSet {
    /// Number of keys written.
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// True when nothing was written.
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Whether `key` was written.
    pub fn contains_key(&self, key: &str) -> bool {
        self.writes.contains_key(key)
    }

    /// Value written at `key`, if any.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.writes.get(key).map(Vec::as_slice)
    }

    /// Written keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.writes.keys().map(String::as_str)
    }
}

/// Committed world state for a single scope (public, or one org's private
/// collection).
///
/// Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a transaction-scoped view over a snapshot of the current state.
    ///
    /// Writes made through the view are visible to later reads through the
    /// same view but not to the store until [`MemoryStore::apply`].
    pub fn simulate(&self) -> SimulatedState {
        SimulatedState {
            snapshot: self.data.read().clone(),
            writes: WriteSet::default(),
        }
    }

    /// Commit a write set, returning the number of keys written.
    pub fn apply(&self, write_set: WriteSet) -> usize {
        let count = write_set.len();
        let mut data = self.data.write();
        for (key, value) in write_set.writes {
            data.insert(key, value);
        }
        debug!(keys = count, "Applied write set");
        count
    }

    /// Write directly to committed state, bypassing simulation.
    pub fn insert(&self, key: impl Into<String>, value: Vec<u8>) {
        self.data.write().insert(key.into(), value);
    }

    /// Number of committed keys.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// True when no key is committed.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl ReadableState for MemoryStore {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.data.read().get(key).cloned())
    }
}

impl RangeableState for MemoryStore {
    fn get_state_range(&self, prefix: &str) -> Result<Vec<StateEntry>, StateError> {
        let data = self.data.read();
        Ok(data
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

/// Transaction-scoped, read-your-writes view over a [`MemoryStore`] snapshot.
#[derive(Debug, Clone, Default)]
pub struct SimulatedState {
    snapshot: BTreeMap<String, Vec<u8>>,
    writes: WriteSet,
}

impl SimulatedState {
    /// Writes buffered so far.
    pub fn write_set(&self) -> &WriteSet {
        &self.writes
    }

    /// Consume the view, yielding its buffered writes.
    pub fn into_write_set(self) -> WriteSet {
        self.writes
    }
}

impl ReadableState for SimulatedState {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        if let Some(value) = self.writes.writes.get(key) {
            return Ok(Some(value.clone()));
        }
        Ok(self.snapshot.get(key).cloned())
    }
}

impl OpaqueState for SimulatedState {
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StateError> {
        if key.is_empty() {
            return Err(StateError::InvalidKey(key.to_string()));
        }
        self.writes.writes.insert(key.to_string(), value);
        Ok(())
    }
}

impl RangeableState for SimulatedState {
    fn get_state_range(&self, prefix: &str) -> Result<Vec<StateEntry>, StateError> {
        let mut merged: BTreeMap<&str, &Vec<u8>> = self
            .snapshot
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        for (k, v) in self
            .writes
            .writes
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
        {
            merged.insert(k.as_str(), v);
        }
        Ok(merged
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect())
    }
}
