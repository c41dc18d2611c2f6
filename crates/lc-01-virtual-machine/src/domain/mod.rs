//! # Domain Layer (Inner Hexagon)
//!
//! What the virtual machine produces and what it runs against.
//! NO I/O, NO async.

pub mod entities;
pub mod ledger;
pub mod value_objects;

pub use entities::*;
pub use ledger::*;
pub use value_objects::*;
