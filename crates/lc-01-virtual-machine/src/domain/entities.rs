//! # Core Domain Entities
//!
//! The raw output of one VM run, before the emulator translates it.

use crate::domain::value_objects::VmIdentifier;
use crate::errors::VmError;
use shared_types::{Address, FieldMap, Value};

// =============================================================================
// EVENT TYPES
// =============================================================================

/// Event types emitted by built-in instructions.
pub mod event_types {
    /// Emitted by `CreateAccount`; field `address`.
    pub const ACCOUNT_CREATED: &str = "lc.AccountCreated";
    /// Emitted by `Mint`; fields `to`, `amount`.
    pub const TOKENS_MINTED: &str = "lc.TokensMinted";
    /// Emitted by `Transfer` for the debited side; fields `from`, `amount`.
    pub const TOKENS_WITHDRAWN: &str = "lc.TokensWithdrawn";
    /// Emitted by `Transfer` for the credited side; fields `to`, `amount`.
    pub const TOKENS_DEPOSITED: &str = "lc.TokensDeposited";
}

// =============================================================================
// RUNTIME EVENT
// =============================================================================

/// Event in the VM's native encoding.
///
/// The payload is the JSON encoding of a field object. The VM never
/// inspects it again after encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeEvent {
    /// Fully qualified event type.
    pub event_type: String,
    /// Account the event is attributed to.
    pub emitter: Address,
    /// Encoded fields.
    pub payload: Vec<u8>,
}

impl RuntimeEvent {
    /// Encodes `fields` into a runtime event.
    pub fn encode(
        event_type: impl Into<String>,
        emitter: Address,
        fields: &FieldMap,
    ) -> Result<Self, VmError> {
        let payload =
            serde_json::to_vec(fields).map_err(|e| VmError::Internal(e.to_string()))?;
        Ok(Self {
            event_type: event_type.into(),
            emitter,
            payload,
        })
    }
}

// =============================================================================
// PROCEDURES
// =============================================================================

/// A transaction as it leaves the VM.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionProcedure {
    /// Identifier assigned by the VM.
    pub id: VmIdentifier,
    /// Failure cause, `None` on success.
    pub err: Option<VmError>,
    /// Log lines in emission order.
    pub logs: Vec<String>,
    /// Events in emission order. Empty when `err` is set.
    pub events: Vec<RuntimeEvent>,
    /// Computation units consumed.
    pub computation_used: u64,
}

impl TransactionProcedure {
    /// Returns true if the VM recorded no error.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.err.is_none()
    }
}

/// A script as it leaves the VM.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptProcedure {
    /// Identifier assigned by the VM.
    pub id: VmIdentifier,
    /// Value produced by the last `ReadBalance`/`Load`, if any.
    pub value: Option<Value>,
    /// Failure cause, `None` on success.
    pub err: Option<VmError>,
    /// Log lines in emission order.
    pub logs: Vec<String>,
    /// Events in emission order. Empty when `err` is set.
    pub events: Vec<RuntimeEvent>,
    /// Computation units consumed.
    pub computation_used: u64,
}
