//! # Driving Ports (API - Inbound)
//!
//! The interface the block harness uses to run programs.

use crate::domain::entities::{ScriptProcedure, TransactionProcedure};
use crate::domain::ledger::LedgerState;
use crate::errors::VmError;
use shared_types::{Script, Transaction};

/// Executes transactions and scripts against a ledger.
///
/// Program failures are data: they are returned inside the procedure's
/// `err` field. `Err` is reserved for the VM being unable to start at all
/// (for example, the program cannot be canonically encoded, so no
/// identifier can be assigned).
pub trait VirtualMachine: Send + Sync {
    /// Run `tx` against `ledger`.
    ///
    /// On success every state change is applied to `ledger`; on failure
    /// `ledger` is left exactly as it was.
    fn run_transaction(
        &self,
        tx: &Transaction,
        ledger: &mut LedgerState,
    ) -> Result<TransactionProcedure, VmError>;

    /// Run `script` read-only against `ledger` with a computation limit.
    fn run_script(
        &self,
        script: &Script,
        ledger: &LedgerState,
        gas_limit: u64,
    ) -> Result<ScriptProcedure, VmError>;
}
