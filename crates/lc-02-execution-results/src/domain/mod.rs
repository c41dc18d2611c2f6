//! # Domain Layer (Inner Hexagon)
//!
//! The emulator's public result model.
//! NO I/O, NO async, NO mutable state.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
