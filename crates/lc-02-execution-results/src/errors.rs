//! # Error Types
//!
//! The only way the result pipeline can fail: an event it cannot decode.

use thiserror::Error;

/// A VM event could not be translated.
///
/// Never skipped: dropping the event would silently corrupt the block's
/// public event ledger, so the whole translation fails instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventDecodeError {
    /// Payload bytes are not valid JSON.
    #[error("event {event_index} ({event_type}): invalid payload: {reason}")]
    InvalidPayload {
        /// Position of the event within its transaction.
        event_index: usize,
        /// Declared event type.
        event_type: String,
        /// Decoder message.
        reason: String,
    },

    /// Payload is JSON but not an object of fields.
    #[error("event {event_index} ({event_type}): payload is a JSON {found}, expected an object")]
    NotAnObject {
        /// Position of the event within its transaction.
        event_index: usize,
        /// Declared event type.
        event_type: String,
        /// JSON kind that was found instead.
        found: &'static str,
    },

    /// Event carries an empty type identifier.
    #[error("event {event_index}: missing event type")]
    MissingType {
        /// Position of the event within its transaction.
        event_index: usize,
    },

    /// More events than an event index can address.
    #[error("event {event_index}: index does not fit in 32 bits")]
    IndexOverflow {
        /// Position of the event within its transaction.
        event_index: usize,
    },
}

impl EventDecodeError {
    /// Position of the offending event.
    #[must_use]
    pub fn event_index(&self) -> usize {
        match self {
            Self::InvalidPayload { event_index, .. }
            | Self::NotAnObject { event_index, .. }
            | Self::MissingType { event_index }
            | Self::IndexOverflow { event_index } => *event_index,
        }
    }
}
