//! Properties layer configuration
//!
//! # Example
//!
//! ```
//! use bus_properties::domain::PropertiesConfigBuilder;
//!
//! let config = PropertiesConfigBuilder::new()
//!     .sanitize_accessor_errors(false)
//!     .signal_channel_capacity(64)
//!     .build()
//!     .expect("valid config");
//! assert!(!config.sanitize_accessor_errors);
//! ```

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// Configuration for exported objects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertiesConfig {
    /// Reply to accessor failures with a generic message only. When false,
    /// the cause is appended to the reply (development setups).
    pub sanitize_accessor_errors: bool,
    /// Include property values in debug logs.
    pub log_values: bool,
    /// Register the Properties and Introspectable members of each exported
    /// object in the connection's dispatch table.
    pub include_standard_interfaces: bool,
    /// Signal buffer per subscriber on the in-memory connection.
    pub signal_channel_capacity: usize,
}

impl Default for PropertiesConfig {
    fn default() -> Self {
        Self {
            sanitize_accessor_errors: true,
            log_values: true,
            include_standard_interfaces: true,
            signal_channel_capacity: 1000,
        }
    }
}

impl PropertiesConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.signal_channel_capacity == 0 {
            return Err(ConfigurationError::InvalidConfig(
                "signal_channel_capacity cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder-style method to toggle error sanitizing
    pub fn with_sanitize_accessor_errors(mut self, sanitize: bool) -> Self {
        self.sanitize_accessor_errors = sanitize;
        self
    }

    /// Builder-style method to toggle value logging
    pub fn with_log_values(mut self, log_values: bool) -> Self {
        self.log_values = log_values;
        self
    }
}

/// Builder for PropertiesConfig with validation
#[derive(Default)]
pub struct PropertiesConfigBuilder {
    sanitize_accessor_errors: Option<bool>,
    log_values: Option<bool>,
    include_standard_interfaces: Option<bool>,
    signal_channel_capacity: Option<usize>,
}

impl PropertiesConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sanitize_accessor_errors(mut self, sanitize: bool) -> Self {
        self.sanitize_accessor_errors = Some(sanitize);
        self
    }

    pub fn log_values(mut self, log_values: bool) -> Self {
        self.log_values = Some(log_values);
        self
    }

    pub fn include_standard_interfaces(mut self, include: bool) -> Self {
        self.include_standard_interfaces = Some(include);
        self
    }

    pub fn signal_channel_capacity(mut self, capacity: usize) -> Self {
        self.signal_channel_capacity = Some(capacity);
        self
    }

    /// Build the PropertiesConfig, validating all parameters
    pub fn build(self) -> Result<PropertiesConfig, ConfigurationError> {
        let defaults = PropertiesConfig::default();

        let config = PropertiesConfig {
            sanitize_accessor_errors: self
                .sanitize_accessor_errors
                .unwrap_or(defaults.sanitize_accessor_errors),
            log_values: self.log_values.unwrap_or(defaults.log_values),
            include_standard_interfaces: self
                .include_standard_interfaces
                .unwrap_or(defaults.include_standard_interfaces),
            signal_channel_capacity: self
                .signal_channel_capacity
                .unwrap_or(defaults.signal_channel_capacity),
        };

        config.validate()?;
        Ok(config)
    }
}
