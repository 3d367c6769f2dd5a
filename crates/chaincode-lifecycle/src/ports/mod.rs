//! # Ports Layer
//!
//! Trait definitions for the chaincode lifecycle.
//!
//! - **Driving Port (Inbound)**: `ChaincodeLifecycleApi`
//! - **Driven Ports (Outbound)**: `ChaincodeStore`, `PackageParser`,
//!   `InstallListener`, `ChannelConfigSource`
//!
//! State access goes through the capability traits of `ledger_state`.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
