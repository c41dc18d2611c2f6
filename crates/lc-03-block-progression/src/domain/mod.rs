//! # Domain Layer (Inner Hexagon)
//!
//! Blocks and the checks a transaction passes before execution.
//! NO I/O, NO locking.

pub mod authorization;
pub mod block;

pub use authorization::*;
pub use block::*;
