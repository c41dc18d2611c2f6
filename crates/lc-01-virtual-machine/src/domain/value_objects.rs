//! # Value Objects
//!
//! Immutable VM primitives.

use sha3::{Digest, Sha3_256};
use std::fmt;

/// A 32-byte transaction or script identifier as assigned by the VM.
///
/// Computed as SHA3-256 over the canonical encoding of the signed body, so
/// the same body always receives the same identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct VmIdentifier(pub [u8; 32]);

impl VmIdentifier {
    /// The zero identifier.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates an identifier from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Identifier of the given canonical bytes.
    #[must_use]
    pub fn digest(canonical: &[u8]) -> Self {
        Self(Sha3_256::digest(canonical).into())
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for VmIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VmIdentifier({})", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for VmIdentifier {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}
