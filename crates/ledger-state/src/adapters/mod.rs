//! State Adapters
//!
//! In-memory implementations of the state ports.

mod memory;

pub use self::memory::{MemoryStore, SimulatedState, WriteSet};
