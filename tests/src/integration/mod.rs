//! Cross-crate flows over a simulated channel.

#[cfg(test)]
pub mod fixtures;
pub mod properties;
pub mod scenarios;
