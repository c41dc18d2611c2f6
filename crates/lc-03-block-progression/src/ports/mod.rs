//! # Ports Layer
//!
//! The harness's public API.

pub mod inbound;

pub use inbound::*;
