//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Port (Inbound)**: `VirtualMachine`
//! - No concrete implementations in this module

pub mod inbound;

pub use inbound::*;
