//! Error types for the block progression harness
//!
//! Only failures that stop a submission from producing a result live here.
//! A transaction that executed and failed is not an error of the harness:
//! it is a `TransactionResult` carrying an `ExecutionError`.

use lc_01_virtual_machine::errors::VmError;
use lc_02_execution_results::domain::TransactionId;
use lc_02_execution_results::errors::EventDecodeError;
use shared_types::{Address, EncodingError, KeyError};
use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Errors returned by the emulator
#[derive(Debug, Error)]
pub enum EmulatorError {
    /// Transaction is structurally unusable
    #[error("Malformed transaction: {0}")]
    MalformedTransaction(String),

    /// A referenced account does not exist
    #[error("Unknown account: {0}")]
    UnknownAccount(Address),

    /// A required signer did not sign
    #[error("Missing signature for account {address}")]
    MissingSignature {
        /// Account whose signature is missing
        address: Address,
    },

    /// A required signer's signature does not verify
    #[error("Invalid signature for account {address}")]
    InvalidSignature {
        /// Account whose signature failed
        address: Address,
    },

    /// Proposal key sequence number is stale or from the future
    #[error("Sequence number mismatch for account {address}: expected {expected}, got {actual}")]
    SequenceNumberMismatch {
        /// Proposing account
        address: Address,
        /// Next sequence number on the ledger
        expected: u64,
        /// Sequence number in the transaction
        actual: u64,
    },

    /// Transaction id already present in the pending block or the chain
    #[error("Duplicate transaction: {0}")]
    DuplicateTransaction(TransactionId),

    /// Pending block holds as many transactions as an index can address
    #[error("Pending block is full")]
    BlockFull,

    /// The VM produced an event the pipeline cannot decode
    #[error("Event translation failed: {0}")]
    EventTranslation(#[from] EventDecodeError),

    /// Account creation transaction did not produce an account
    #[error("Account creation failed: {0}")]
    AccountCreationFailed(String),

    /// The VM could not produce a procedure at all
    #[error("Virtual machine error: {0}")]
    Vm(#[from] VmError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Key material error
    #[error("Key error: {0}")]
    Key(#[from] KeyError),

    /// Canonical encoding error
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),
}

impl EmulatorError {
    /// Returns true if the transaction was rejected before execution.
    ///
    /// Rejected transactions are never appended to a block and do not
    /// advance any sequence number.
    #[must_use]
    pub fn is_pre_execution(&self) -> bool {
        matches!(
            self,
            Self::MalformedTransaction(_)
                | Self::UnknownAccount(_)
                | Self::MissingSignature { .. }
                | Self::InvalidSignature { .. }
                | Self::SequenceNumberMismatch { .. }
                | Self::DuplicateTransaction(_)
                | Self::BlockFull
                | Self::Encoding(_)
        )
    }
}
