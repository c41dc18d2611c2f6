//! # LC-01 Virtual Machine - Program Execution Collaborator
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Runs transaction and script programs against the in-memory ledger and
//! hands back the raw *procedure*: identifier, optional error, log lines and
//! natively encoded events. Turning a procedure into the emulator's public
//! result model is the job of `lc-02-execution-results`.
//!
//! ## Execution Rules
//!
//! | Rule | Enforcement Location |
//! |------|---------------------|
//! | One computation unit per instruction | `interpreter.rs` - `Interpreter::charge()` |
//! | All-or-nothing state changes | `interpreter.rs` - `ReferenceVm::run_transaction()` |
//! | Events discarded on failure, logs kept | `interpreter.rs` - `Interpreter::run()` |
//! | Scripts cannot mutate | `interpreter.rs` - `Interpreter::step()` |
//! | Identifier = SHA3-256(canonical body) | `domain/value_objects.rs` - `VmIdentifier::digest()` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use lc_01_virtual_machine::prelude::*;
//!
//! let vm = ReferenceVm::new();
//! let procedure = vm.run_transaction(&tx, &mut ledger)?;
//! if procedure.succeeded() {
//!     println!("{} events", procedure.events.len());
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
pub mod interpreter;
pub mod ports;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::entities::{
        event_types, RuntimeEvent, ScriptProcedure, TransactionProcedure,
    };
    pub use crate::domain::ledger::LedgerState;
    pub use crate::domain::value_objects::VmIdentifier;
    pub use crate::errors::VmError;
    pub use crate::interpreter::ReferenceVm;
    pub use crate::ports::inbound::VirtualMachine;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 1;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Virtual Machine";
