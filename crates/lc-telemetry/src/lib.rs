//! # Local Chain Telemetry
//!
//! Structured logging for the emulator crates. Every crate logs through
//! `tracing` macros; the binary or test that embeds the emulator calls
//! [`init_tracing`] once to decide where those records go.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lc_telemetry::{init_tracing, TelemetryConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_tracing(&TelemetryConfig::from_env())?;
//!     // Emulator code here
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LC_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `LC_JSON_LOGS` | `false` | JSON formatted records |
//! | `LC_LOG_SOURCE` | `false` | File and line in each record |
//! | `LC_SERVICE_NAME` | `local-chain` | Service name |

#![warn(missing_docs)]

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{build_filter, init_test_tracing, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("Tracing already initialized: {0}")]
    AlreadyInitialized(String),

    /// The configuration cannot be turned into a subscriber.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
