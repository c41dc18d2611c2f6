//! # LC-03 Block Progression - Local Chain Harness
//!
//! **Subsystem ID:** 3
//!
//! ## Purpose
//!
//! Drives the emulated chain forward. Transactions are checked, executed by
//! the virtual machine, assembled into canonical results and appended to the
//! pending block; `commit_block` seals the pending block and makes it
//! queryable. Scripts run read-only on the side.
//!
//! ## Block Lifecycle
//!
//! ```text
//!            submit_transaction            submit_transaction
//!   ┌───────┐ ───────────────► ┌─────────┐ ◄──────────────┐
//!   │ Empty │                  │ Pending │ ───────────────┘
//!   └───────┘ ◄─────────────── └─────────┘
//!       │ ▲      commit_block
//!       └─┘ commit_block (empty block)
//! ```
//!
//! ## Rules
//!
//! | Rule | Enforcement Location |
//! |------|---------------------|
//! | Rejected transactions are never appended | `service.rs` - `execute_locked()` |
//! | Failed transactions are appended | `service.rs` - `execute_locked()` |
//! | Sequence number advances on success and failure | `service.rs` - `execute_locked()` |
//! | Transaction index = position in pending block | `domain/block.rs` - `next_transaction_index()` |
//! | Scripts never append | `service.rs` - `execute_script()` |
//! | Empty commits are legal | `domain/block.rs` - `PendingBlock::seal()` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use lc_03_block_progression::prelude::*;
//!
//! let emulator = Emulator::new(EmulatorConfig::from_env())?;
//! let result = emulator.submit_transaction(tx)?;
//! let block = emulator.commit_block()?;
//! assert_eq!(block.results[0], result);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::config::EmulatorConfig;
    pub use crate::domain::{Block, BlockId, BlockState, PendingBlock};
    pub use crate::error::{EmulatorError, Result};
    pub use crate::ports::inbound::BlockProgressionApi;
    pub use crate::service::{Emulator, EmulatorStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 3;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Block Progression";
