//! # Error Wrapper
//!
//! Turns the VM's optional failure into the emulator's optional
//! [`ExecutionError`]. Absence stays absence.

use crate::domain::{ExecutionError, ExecutionErrorKind};
use lc_01_virtual_machine::errors::VmError;

/// Wraps a VM error, keeping its message and concrete type intact.
#[must_use]
pub fn wrap_vm_error(err: Option<VmError>) -> Option<ExecutionError> {
    err.map(|e| {
        let kind = classify(&e);
        ExecutionError::new(kind, e)
    })
}

fn classify(err: &VmError) -> ExecutionErrorKind {
    if err.is_internal() {
        ExecutionErrorKind::Internal
    } else if err.is_resource_limit() {
        ExecutionErrorKind::ResourceLimit
    } else {
        ExecutionErrorKind::Execution
    }
}
