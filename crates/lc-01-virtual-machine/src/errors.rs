//! # Error Types
//!
//! Failures raised by the virtual machine while running a program.
//!
//! Program failures are recorded in the procedure and travel with it to the
//! result pipeline. Only `Internal` is ever returned as `Err`, when no
//! procedure could be produced at all.

use shared_types::Address;
use thiserror::Error;

/// Errors that can occur during program execution.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VmError {
    /// Source account cannot cover the transfer.
    #[error("insufficient balance: account {account} has {available}, needs {required}")]
    InsufficientBalance {
        /// Account being debited.
        account: Address,
        /// Amount requested.
        required: u64,
        /// Amount held.
        available: u64,
    },

    /// Referenced account does not exist.
    #[error("account not found: {0}")]
    AccountNotFound(Address),

    /// Account touched by a privileged instruction did not authorize.
    #[error("account {0} did not authorize this transaction")]
    Unauthorized(Address),

    /// Program needed more computation than its limit allows.
    #[error("computation limit exceeded: limit {limit}")]
    ComputationLimitExceeded {
        /// Limit in computation units.
        limit: u64,
    },

    /// Crediting would overflow the balance.
    #[error("balance overflow for account {0}")]
    BalanceOverflow(Address),

    /// Scripts may not write to the ledger.
    #[error("read-only violation: scripts cannot execute {instruction}")]
    ReadOnlyViolation {
        /// Name of the rejected instruction.
        instruction: String,
    },

    /// Program called `Abort`.
    #[error("execution aborted: {0}")]
    Aborted(String),

    /// Internal error (should not happen in production).
    #[error("internal error: {0}")]
    Internal(String),
}

impl VmError {
    /// Returns true for faults of the VM itself rather than of the program.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }

    /// Returns true if the program ran out of its resource allowance.
    #[must_use]
    pub fn is_resource_limit(&self) -> bool {
        matches!(self, Self::ComputationLimitExceeded { .. })
    }
}
