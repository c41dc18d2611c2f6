//! # Core Domain Entities
//!
//! What the rest of the emulator sees of an execution. Every type here is
//! constructed once by the pipeline and is read-only afterwards: fields are
//! private and only exposed through accessors.

use crate::domain::value_objects::{ExecutionErrorKind, TransactionId};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use shared_types::{Address, FieldMap, Value};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// EVENT
// =============================================================================

/// An emitted event, correlated with its transaction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Event {
    event_type: String,
    emitter: Address,
    fields: FieldMap,
    transaction_id: TransactionId,
    transaction_index: u32,
    event_index: u32,
}

impl Event {
    pub(crate) fn new(
        event_type: String,
        emitter: Address,
        fields: FieldMap,
        transaction_id: TransactionId,
        transaction_index: u32,
        event_index: u32,
    ) -> Self {
        Self {
            event_type,
            emitter,
            fields,
            transaction_id,
            transaction_index,
            event_index,
        }
    }

    /// Fully qualified event type.
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Account the event is attributed to.
    #[must_use]
    pub fn emitter(&self) -> Address {
        self.emitter
    }

    /// Decoded fields.
    #[must_use]
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// A single field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Transaction that emitted the event.
    #[must_use]
    pub fn transaction_id(&self) -> TransactionId {
        self.transaction_id
    }

    /// Position of that transaction within its block.
    #[must_use]
    pub fn transaction_index(&self) -> u32 {
        self.transaction_index
    }

    /// Position of this event within its transaction.
    #[must_use]
    pub fn event_index(&self) -> u32 {
        self.event_index
    }
}

// =============================================================================
// EXECUTION ERROR
// =============================================================================

/// Why a transaction or script failed.
///
/// Wraps the VM's error unaltered. `Display` prints its message; the
/// concrete type is recoverable through [`ExecutionError::downcast_ref`].
#[derive(Clone)]
pub struct ExecutionError {
    kind: ExecutionErrorKind,
    cause: Arc<dyn StdError + Send + Sync>,
}

impl ExecutionError {
    /// Wraps `cause` under `kind`.
    pub fn new<E>(kind: ExecutionErrorKind, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            kind,
            cause: Arc::new(cause),
        }
    }

    /// Failure category.
    #[must_use]
    pub fn kind(&self) -> ExecutionErrorKind {
        self.kind
    }

    /// The original error's message.
    #[must_use]
    pub fn message(&self) -> String {
        self.cause.to_string()
    }

    /// The original error.
    #[must_use]
    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.cause.as_ref()
    }

    /// The original error as its concrete type, if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: StdError + 'static>(&self) -> Option<&T> {
        self.cause.downcast_ref::<T>()
    }
}

impl fmt::Debug for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionError")
            .field("kind", &self.kind)
            .field("cause", &self.cause)
            .finish()
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.cause, f)
    }
}

impl StdError for ExecutionError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.cause.as_ref())
    }
}

impl PartialEq for ExecutionError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.message() == other.message()
    }
}

impl Serialize for ExecutionError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ExecutionError", 2)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

// =============================================================================
// TRANSACTION RESULT
// =============================================================================

/// The canonical record of one executed transaction.
///
/// Events are in emission order and all carry `transaction_id`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransactionResult {
    transaction_id: TransactionId,
    error: Option<ExecutionError>,
    logs: Vec<String>,
    events: Vec<Event>,
}

impl TransactionResult {
    pub(crate) fn new(
        transaction_id: TransactionId,
        error: Option<ExecutionError>,
        logs: Vec<String>,
        events: Vec<Event>,
    ) -> Self {
        Self {
            transaction_id,
            error,
            logs,
            events,
        }
    }

    /// Identifier of the transaction.
    #[must_use]
    pub fn transaction_id(&self) -> TransactionId {
        self.transaction_id
    }

    /// Failure cause, `None` on success.
    #[must_use]
    pub fn error(&self) -> Option<&ExecutionError> {
        self.error.as_ref()
    }

    /// Log lines, verbatim.
    #[must_use]
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Events, in emission order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns true if execution recorded no error.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    /// Returns true if execution recorded an error.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }

    /// Message of the failure, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ExecutionError::message)
    }
}

// =============================================================================
// SCRIPT RESULT
// =============================================================================

/// Result of a read-only script. Same shape as a transaction result plus the
/// returned value; never sealed into a block.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScriptResult {
    script_id: TransactionId,
    value: Option<Value>,
    error: Option<ExecutionError>,
    logs: Vec<String>,
    events: Vec<Event>,
}

impl ScriptResult {
    pub(crate) fn new(
        script_id: TransactionId,
        value: Option<Value>,
        error: Option<ExecutionError>,
        logs: Vec<String>,
        events: Vec<Event>,
    ) -> Self {
        Self {
            script_id,
            value,
            error,
            logs,
            events,
        }
    }

    /// Identifier of the script, in transaction-id format.
    #[must_use]
    pub fn script_id(&self) -> TransactionId {
        self.script_id
    }

    /// Value returned by the script.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Failure cause, `None` on success.
    #[must_use]
    pub fn error(&self) -> Option<&ExecutionError> {
        self.error.as_ref()
    }

    /// Log lines, verbatim.
    #[must_use]
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Events, in emission order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns true if the script recorded no error.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

// =============================================================================
// TESTS
// =============================================================================
