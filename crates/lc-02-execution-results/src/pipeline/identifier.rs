//! # Identifier Codec
//!
//! The VM and the emulator use the same 32 bytes under different types.
//! Conversion is a plain copy in both directions.

use crate::domain::TransactionId;
use lc_01_virtual_machine::domain::VmIdentifier;

/// Converts a VM identifier into the emulator's transaction id.
#[must_use]
pub fn vm_identifier_to_transaction_id(id: &VmIdentifier) -> TransactionId {
    TransactionId::new(*id.as_bytes())
}

/// Converts a transaction id back into the VM's identifier.
#[must_use]
pub fn transaction_id_to_vm_identifier(id: &TransactionId) -> VmIdentifier {
    VmIdentifier::new(*id.as_bytes())
}
