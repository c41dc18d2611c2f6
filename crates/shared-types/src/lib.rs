//! # Shared Types Crate
//!
//! This crate contains the entities every emulator crate agrees on: account
//! addresses, the ledger account record, the transaction and script model,
//! and the ed25519 key material used to sign transactions.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Canonical Encoding**: Transaction bodies and scripts have exactly one
//!   byte encoding (bincode); signatures and identifiers are computed over it.
//! - **No Execution Logic**: Nothing in this crate runs a program.

pub mod entities;
pub mod errors;
pub mod keys;

pub use entities::*;
pub use errors::*;
pub use keys::*;
