//! Lifecycle configuration from defaults and environment variables.

use crate::domain::value_objects::LIFECYCLE_NAMESPACE;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Default install package limit: 100 MiB.
pub const DEFAULT_MAX_PACKAGE_BYTES: usize = 100 * 1024 * 1024;

/// Invalid configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable present but unparseable.
    #[error("invalid value '{value}' for {var}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },

    /// Package limit of zero would reject every install.
    #[error("max_package_bytes must be greater than 0")]
    ZeroPackageLimit,

    /// The reserved namespace must have a name.
    #[error("lifecycle_namespace must not be empty")]
    EmptyLifecycleNamespace,
}

/// Configuration of the lifecycle engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Largest install package accepted, in bytes.
    pub max_package_bytes: usize,

    /// Name of the lifecycle's own, always defined, namespace.
    pub lifecycle_namespace: String,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            max_package_bytes: DEFAULT_MAX_PACKAGE_BYTES,
            lifecycle_namespace: LIFECYCLE_NAMESPACE.to_string(),
        }
    }
}

impl LifecycleConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LIFECYCLE_MAX_PACKAGE_BYTES`: Install size limit (default: 104857600)
    /// - `LIFECYCLE_NAMESPACE`: Reserved namespace (default: _lifecycle)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|var| env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through
    /// `lookup`.
    pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("LIFECYCLE_MAX_PACKAGE_BYTES") {
            config.max_package_bytes =
                value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    var: "LIFECYCLE_MAX_PACKAGE_BYTES",
                    value: value.clone(),
                })?;
        }

        if let Some(value) = lookup("LIFECYCLE_NAMESPACE") {
            config.lifecycle_namespace = value;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_package_bytes == 0 {
            return Err(ConfigError::ZeroPackageLimit);
        }
        if self.lifecycle_namespace.is_empty() {
            return Err(ConfigError::EmptyLifecycleNamespace);
        }
        Ok(())
    }
}
