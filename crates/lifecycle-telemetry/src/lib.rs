//! # Lifecycle Telemetry
//!
//! Log output for processes embedding the chaincode lifecycle.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lifecycle_telemetry::{init_tracing, TelemetryConfig};
//!
//! fn main() {
//!     init_tracing(&TelemetryConfig::from_env()).expect("Failed to init tracing");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LIFECYCLE_SERVICE_NAME` | `chaincode-lifecycle` | Service name in events |
//! | `LIFECYCLE_LOG_LEVEL` | `info` | Log filter (falls back to `RUST_LOG`) |
//! | `LIFECYCLE_CONSOLE_OUTPUT` | `true` | Write events to stdout |
//! | `LIFECYCLE_JSON_LOGS` | `false` | JSON lines output |

#![warn(missing_docs)]

mod config;
mod logging;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// The log filter directive could not be parsed.
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),

    /// A global subscriber is already installed.
    #[error("tracing subscriber already initialized")]
    AlreadyInitialized,
}
