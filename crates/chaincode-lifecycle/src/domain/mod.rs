//! # Domain Module
//!
//! Records persisted by the lifecycle, their type tags, and the sequence
//! rules every approval and commit must satisfy.

pub mod entities;
pub mod invariants;
pub mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use value_objects::*;
