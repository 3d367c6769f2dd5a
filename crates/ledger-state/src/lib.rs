//! # Ledger State
//!
//! Capability-scoped views over the transaction-scoped key/value store that
//! the chaincode lifecycle reads and writes.
//!
//! ## Capabilities
//!
//! | Trait | Read | Write | Range | Typical holder |
//! |-------|------|-------|-------|----------------|
//! | `ReadableState` | yes | no | no | public world state during queries |
//! | `OpaqueState` | no | yes | no | another organization's private scope |
//! | `ReadWritableState` | yes | yes | no | public state during commit, own org scope |
//! | `RangeableState` | yes | no | yes | namespace enumeration |
//!
//! Call sites declare the narrowest capability they need, so code that only
//! holds an `OpaqueState` can never condition on what it writes.
//!
//! ## Module Structure
//!
//! ```text
//! ledger-state/
//! ├── errors.rs     # StateError
//! ├── ports.rs      # Capability traits
//! └── adapters/     # MemoryStore + SimulatedState (read-your-writes view)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod errors;
pub mod ports;

pub use adapters::{MemoryStore, SimulatedState, WriteSet};
pub use errors::StateError;
pub use ports::{OpaqueState, RangeableState, ReadWritableState, ReadableState, StateEntry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
