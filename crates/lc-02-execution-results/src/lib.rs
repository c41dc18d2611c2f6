//! # LC-02 Execution Results - Canonical Transaction Results
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Translates what the virtual machine hands back after running a program
//! (a *procedure*) into the emulator's public result model. Block commit,
//! script execution and test harnesses only ever see the types defined here.
//!
//! ## Pipeline
//!
//! ```text
//! TransactionProcedure ──► identifier codec ──► TransactionId
//!                     ├──► error wrapper    ──► Option<ExecutionError>
//!                     ├──► event translator ──► Vec<Event>
//!                     └──► logs (verbatim)
//!                                  │
//!                                  ▼
//!                          TransactionResult
//! ```
//!
//! ## Guarantees
//!
//! | Guarantee | Enforcement Location |
//! |-----------|---------------------|
//! | N native events become N events, same order | `pipeline/events.rs` - `translate_events()` |
//! | Every event carries the result's transaction id | `pipeline/events.rs` - `translate_one()` |
//! | No VM error means no `ExecutionError` | `pipeline/error_wrapper.rs` - `wrap_vm_error()` |
//! | Error message is the VM's message | `domain/entities.rs` - `ExecutionError` |
//! | Same procedure, same result | `pipeline/assembler.rs` - `assemble_transaction_result()` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use lc_02_execution_results::prelude::*;
//!
//! let result = assemble_transaction_result(&procedure, tx_index)?;
//! if let Some(err) = result.error() {
//!     eprintln!("transaction {} failed: {err}", result.transaction_id());
//! }
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod domain;
pub mod errors;
pub mod pipeline;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::entities::{Event, ExecutionError, ScriptResult, TransactionResult};
    pub use crate::domain::value_objects::{ExecutionErrorKind, TransactionId};
    pub use crate::errors::EventDecodeError;
    pub use crate::pipeline::{
        assemble_script_result, assemble_transaction_result, transaction_id_to_vm_identifier,
        translate_events, vm_identifier_to_transaction_id, wrap_vm_error,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 2;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Execution Results";
