//! # Transaction Result Assembler
//!
//! Combines the identifier codec, the error wrapper and the event
//! translator into one pure function per procedure kind.
//!
//! ## Steps (fixed order)
//!
//! 1. Convert the VM identifier to a `TransactionId`.
//! 2. Wrap the optional VM error.
//! 3. Translate events, stamped with the id from step 1.
//! 4. Copy the log lines unmodified.

use crate::domain::{ScriptResult, TransactionResult};
use crate::errors::EventDecodeError;
use crate::pipeline::error_wrapper::wrap_vm_error;
use crate::pipeline::events::translate_events;
use crate::pipeline::identifier::vm_identifier_to_transaction_id;
use lc_01_virtual_machine::domain::{ScriptProcedure, TransactionProcedure};

/// Builds the canonical result of a transaction at `transaction_index`
/// within its block.
///
/// Pure: the same procedure and index always produce an equal result.
pub fn assemble_transaction_result(
    procedure: &TransactionProcedure,
    transaction_index: u32,
) -> Result<TransactionResult, EventDecodeError> {
    let transaction_id = vm_identifier_to_transaction_id(&procedure.id);
    let error = wrap_vm_error(procedure.err.clone());
    let events = translate_events(&procedure.events, transaction_id, transaction_index)?;
    let logs = procedure.logs.clone();

    Ok(TransactionResult::new(transaction_id, error, logs, events))
}

/// Builds the result of a script. Scripts live outside any block, so their
/// events carry transaction index 0.
pub fn assemble_script_result(
    procedure: &ScriptProcedure,
) -> Result<ScriptResult, EventDecodeError> {
    let script_id = vm_identifier_to_transaction_id(&procedure.id);
    let error = wrap_vm_error(procedure.err.clone());
    let events = translate_events(&procedure.events, script_id, 0)?;

    Ok(ScriptResult::new(
        script_id,
        procedure.value.clone(),
        error,
        procedure.logs.clone(),
        events,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExecutionErrorKind;
    use lc_01_virtual_machine::domain::{RuntimeEvent, VmIdentifier};
    use lc_01_virtual_machine::errors::VmError;
    use serde_json::json;
    use shared_types::{Address, FieldMap};

    fn procedure(events: usize, err: Option<VmError>) -> TransactionProcedure {
        let events = (0..events)
            .map(|i| {
                let mut fields = FieldMap::new();
                fields.insert("n".into(), json!(i));
                RuntimeEvent::encode("A.Counter.Tick", Address::SERVICE, &fields).unwrap()
            })
            .collect();
        TransactionProcedure {
            id: VmIdentifier::digest(b"tx"),
            err,
            logs: vec!["first".into(), "second".into()],
            events,
            computation_used: 3,
        }
    }

    #[test]
    fn test_success_result() {
        let input = procedure(2, None);

        let result = assemble_transaction_result(&input, 0).unwrap();

        assert!(result.succeeded());
        assert_eq!(result.transaction_id().as_bytes(), input.id.as_bytes());
        assert_eq!(result.logs(), ["first", "second"]);
        assert_eq!(result.events().len(), 2);
        assert!(result
            .events()
            .iter()
            .all(|e| e.transaction_id() == result.transaction_id()));
    }

    #[test]
    fn test_failure_result() {
        let input = procedure(0, Some(VmError::Aborted("out of luck".into())));

        let result = assemble_transaction_result(&input, 5).unwrap();

        assert!(result.failed());
        let err = result.error().unwrap();
        assert_eq!(err.kind(), ExecutionErrorKind::Execution);
        assert!(err.message().contains("out of luck"));
        assert!(result.events().is_empty());
        assert_eq!(result.logs().len(), 2);
    }

    #[test]
    fn test_assembly_is_idempotent() {
        let input = procedure(3, Some(VmError::ComputationLimitExceeded { limit: 2 }));

        let a = assemble_transaction_result(&input, 7).unwrap();
        let b = assemble_transaction_result(&input, 7).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_translation_failure_propagates() {
        let mut input = procedure(1, None);
        input.events.push(RuntimeEvent {
            event_type: "A.Broken".into(),
            emitter: Address::SERVICE,
            payload: b"\"just a string\"".to_vec(),
        });

        let err = assemble_transaction_result(&input, 0).unwrap_err();

        assert_eq!(err.event_index(), 1);
    }

    #[test]
    fn test_script_result_carries_value() {
        let input = ScriptProcedure {
            id: VmIdentifier::digest(b"script"),
            value: Some(json!(42)),
            err: None,
            logs: vec![],
            events: vec![],
            computation_used: 1,
        };

        let result = assemble_script_result(&input).unwrap();

        assert!(result.succeeded());
        assert_eq!(result.value(), Some(&json!(42)));
        assert_eq!(result.script_id().as_bytes(), input.id.as_bytes());
    }
}
