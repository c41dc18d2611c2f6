//! # Event Translator
//!
//! Converts the VM's natively encoded events into [`Event`]s stamped with
//! their transaction id, transaction index and position.
//!
//! Translation is all or nothing. One undecodable event fails the whole
//! batch and names the offending index; nothing is skipped or reordered.

use crate::domain::{Event, TransactionId};
use crate::errors::EventDecodeError;
use lc_01_virtual_machine::domain::RuntimeEvent;
use shared_types::Value;

/// Translates `events` in emission order.
///
/// The returned vector has the same length as the input and event `i`
/// carries `event_index == i`.
pub fn translate_events(
    events: &[RuntimeEvent],
    transaction_id: TransactionId,
    transaction_index: u32,
) -> Result<Vec<Event>, EventDecodeError> {
    events
        .iter()
        .enumerate()
        .map(|(position, event)| {
            translate_one(position, event, transaction_id, transaction_index)
        })
        .collect()
}

fn translate_one(
    position: usize,
    event: &RuntimeEvent,
    transaction_id: TransactionId,
    transaction_index: u32,
) -> Result<Event, EventDecodeError> {
    let event_index = u32::try_from(position).map_err(|_| EventDecodeError::IndexOverflow {
        event_index: position,
    })?;

    if event.event_type.is_empty() {
        return Err(EventDecodeError::MissingType {
            event_index: position,
        });
    }

    let decoded: Value = serde_json::from_slice(&event.payload).map_err(|e| {
        EventDecodeError::InvalidPayload {
            event_index: position,
            event_type: event.event_type.clone(),
            reason: e.to_string(),
        }
    })?;

    let fields = match decoded {
        Value::Object(fields) => fields,
        other => {
            return Err(EventDecodeError::NotAnObject {
                event_index: position,
                event_type: event.event_type.clone(),
                found: json_kind(&other),
            })
        }
    };

    Ok(Event::new(
        event.event_type.clone(),
        event.emitter,
        fields,
        transaction_id,
        transaction_index,
        event_index,
    ))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
