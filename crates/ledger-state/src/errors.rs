//! # State Errors
//!
//! Failures surfaced by the state views. The lifecycle wraps these with the
//! namespace/key being accessed before propagating them.

use thiserror::Error;

/// Errors from state access operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Keys must be non-empty.
    #[error("invalid state key: {0:?}")]
    InvalidKey(String),

    /// The backing store rejected or failed the operation.
    #[error("state backend error: {0}")]
    Backend(String),
}
