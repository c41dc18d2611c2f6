//! # Result Pipeline
//!
//! Pure functions from VM procedures to the public result model.
//! Holds no state between calls.

pub mod assembler;
pub mod error_wrapper;
pub mod events;
pub mod identifier;

pub use assembler::{assemble_script_result, assemble_transaction_result};
pub use error_wrapper::wrap_vm_error;
pub use events::translate_events;
pub use identifier::{transaction_id_to_vm_identifier, vm_identifier_to_transaction_id};
