//! # Bus Telemetry
//!
//! Logging setup shared by every binary and test in the workspace.
//!
//! ## Components
//!
//! - `TelemetryConfig`: Settings read from the environment
//! - `init_telemetry`: Installs a `tracing-subscriber` registry with an
//!   `EnvFilter` and a human or JSON formatting layer
//! - `LogCapture`: In-memory writer for asserting on log output in tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bus_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("Failed to init telemetry");
//!     // Logs from every crate now go through the installed subscriber
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BUS_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `BUS_JSON_LOGS` | `false` | JSON formatted logs |
//! | `BUS_SERVICE_NAME` | `bus-properties` | Service name attached to logs |

mod capture;
mod config;
mod tracing_setup;

pub use capture::LogCapture;
pub use config::TelemetryConfig;
pub use tracing_setup::{build_filter, init_tracing, TracingGuard};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter {filter:?}: {reason}")]
    Filter { filter: String, reason: String },

    #[error("Failed to install subscriber: {0}")]
    SubscriberInit(String),
}

/// Initialize logging for the process.
///
/// Returns a guard to hold for the lifetime of the application.
///
/// # Errors
///
/// - `Filter` if the configured log level does not parse
/// - `SubscriberInit` if a global subscriber is already installed
pub fn init_telemetry(config: TelemetryConfig) -> Result<TracingGuard, TelemetryError> {
    init_tracing(&config)
}
