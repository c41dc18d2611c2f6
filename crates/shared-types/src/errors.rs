//! # Error Types
//!
//! Defines error types used across crates.

use thiserror::Error;

/// Errors raised while producing the canonical encoding of a transaction
/// body or script.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// bincode refused the value.
    #[error("canonical encoding failed: {0}")]
    Bincode(#[from] bincode::Error),
}

/// Errors related to key material and signature checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The 32 bytes do not decode to a valid ed25519 point.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// The signature does not verify against the message and key.
    #[error("signature verification failed")]
    SignatureVerificationFailed,

    /// A hex-encoded seed could not be parsed.
    #[error("invalid key seed: {0}")]
    InvalidSeed(String),
}
