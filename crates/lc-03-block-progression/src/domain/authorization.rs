//! # Pre-execution Checks
//!
//! Everything a transaction must satisfy before the VM sees it. A failed
//! check rejects the transaction outright: nothing is appended and no
//! sequence number moves.
//!
//! ## Order
//!
//! 1. Shape: non-empty program, gas limit in `1..=max`.
//! 2. Signatures: every required signer exists and one of its keys verifies
//!    one of its signatures over the canonical body.
//! 3. Proposal key: sequence number equals the ledger's.

use crate::error::{EmulatorError, Result};
use lc_01_virtual_machine::domain::LedgerState;
use shared_types::{verify_signature, Account, Transaction, TransactionSignature};

/// Rejects transactions no VM should be asked to run.
pub fn check_well_formed(tx: &Transaction, max_gas_limit: u64) -> Result<()> {
    if tx.body.program.is_empty() {
        return Err(EmulatorError::MalformedTransaction("empty program".into()));
    }
    if tx.body.gas_limit == 0 {
        return Err(EmulatorError::MalformedTransaction("zero gas limit".into()));
    }
    if tx.body.gas_limit > max_gas_limit {
        return Err(EmulatorError::MalformedTransaction(format!(
            "gas limit {} exceeds maximum {}",
            tx.body.gas_limit, max_gas_limit
        )));
    }
    Ok(())
}

/// Verifies the signature of every required signer against `ledger`.
pub fn check_signatures(tx: &Transaction, ledger: &LedgerState) -> Result<()> {
    let payload = tx.payload_bytes()?;

    for signer in tx.required_signers() {
        let account = ledger
            .account(&signer)
            .ok_or(EmulatorError::UnknownAccount(signer))?;

        let mut signatures = tx.signatures.iter().filter(|s| s.address == signer).peekable();
        if signatures.peek().is_none() {
            return Err(EmulatorError::MissingSignature { address: signer });
        }
        if !signatures.any(|s| signed_by(account, &payload, s)) {
            return Err(EmulatorError::InvalidSignature { address: signer });
        }
    }
    Ok(())
}

fn signed_by(account: &Account, payload: &[u8], signature: &TransactionSignature) -> bool {
    account
        .public_keys
        .iter()
        .any(|key| verify_signature(key, payload, &signature.signature).is_ok())
}

/// Checks the proposal key against the proposer's ledger sequence number.
pub fn check_sequence_number(tx: &Transaction, ledger: &LedgerState) -> Result<()> {
    let proposal = tx.body.proposal_key;
    let account = ledger
        .account(&proposal.address)
        .ok_or(EmulatorError::UnknownAccount(proposal.address))?;

    if account.sequence_number != proposal.sequence_number {
        return Err(EmulatorError::SequenceNumberMismatch {
            address: proposal.address,
            expected: account.sequence_number,
            actual: proposal.sequence_number,
        });
    }
    Ok(())
}
