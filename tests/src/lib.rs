//! # Chaincode Lifecycle Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs   # Simulated channel: public store + one store per org
//!     ├── scenarios.rs  # End-to-end approve/commit/install flows
//!     └── properties.rs # Sequence and agreement properties over seeded runs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p lifecycle-tests
//! cargo test -p lifecycle-tests integration::properties::
//! ```

pub mod integration;
