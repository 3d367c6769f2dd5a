//! # Adapters Layer
//!
//! In-process implementations of the outbound ports, used by tests and by
//! embedders that do not need durable package storage.

pub mod chaincode_store;
pub mod channel_config;
pub mod package_parser;

pub use chaincode_store::*;
pub use channel_config::*;
pub use package_parser::*;
