//! # Ed25519 Keys
//!
//! Account keys and transaction signatures.
//!
//! Signing is deterministic (nonce derived from the message), so signing the
//! same transaction body twice yields the same signature.

use crate::entities::{PublicKey, Signature};
use crate::errors::KeyError;
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use std::fmt;

/// Ed25519 keypair held by an account owner.
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from a secret seed (32 bytes).
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Create from a hex-encoded 32-byte seed.
    pub fn from_hex_seed(seed: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(seed.trim_start_matches("0x"))
            .map_err(|e| KeyError::InvalidSeed(e.to_string()))?;
        let seed: [u8; 32] = bytes.try_into().map_err(|v: Vec<u8>| {
            KeyError::InvalidSeed(format!("expected 32 bytes, got {}", v.len()))
        })?;
        Ok(Self::from_seed(seed))
    }

    /// Public half of the keypair.
    pub fn public_key(&self) -> PublicKey {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message).to_bytes()
    }

    /// Secret seed (for persisting the key elsewhere).
    pub fn to_seed(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &hex::encode(self.public_key()))
            .finish_non_exhaustive()
    }
}

/// Verify `signature` over `message` against `public_key`.
pub fn verify_signature(
    public_key: &PublicKey,
    message: &[u8],
    signature: &Signature,
) -> Result<(), KeyError> {
    let verifying_key =
        VerifyingKey::from_bytes(public_key).map_err(|_| KeyError::InvalidPublicKey)?;
    let sig = ed25519_dalek::Signature::from_bytes(signature);

    verifying_key
        .verify(message, &sig)
        .map_err(|_| KeyError::SignatureVerificationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify() {
        let keypair = KeyPair::generate();
        let message = b"transaction payload";

        let signature = keypair.sign(message);
        assert!(verify_signature(&keypair.public_key(), message, &signature).is_ok());
    }

    #[test]
    fn test_wrong_message_fails() {
        let keypair = KeyPair::generate();
        let signature = keypair.sign(b"original");

        assert_eq!(
            verify_signature(&keypair.public_key(), b"tampered", &signature),
            Err(KeyError::SignatureVerificationFailed)
        );
    }

    #[test]
    fn test_wrong_key_fails() {
        let signer = KeyPair::generate();
        let other = KeyPair::generate();
        let signature = signer.sign(b"payload");

        assert!(verify_signature(&other.public_key(), b"payload", &signature).is_err());
    }

    #[test]
    fn test_seed_roundtrip_is_deterministic() {
        let seed = [7u8; 32];
        let a = KeyPair::from_seed(seed);
        let b = KeyPair::from_seed(seed);

        assert_eq!(a.public_key(), b.public_key());
        assert_eq!(a.sign(b"msg"), b.sign(b"msg"));
        assert_eq!(a.to_seed(), seed);
    }

    #[test]
    fn test_hex_seed() {
        let hex_seed = hex::encode([9u8; 32]);
        let from_hex = KeyPair::from_hex_seed(&hex_seed).unwrap();
        assert_eq!(from_hex.public_key(), KeyPair::from_seed([9u8; 32]).public_key());

        let prefixed = KeyPair::from_hex_seed(&format!("0x{hex_seed}")).unwrap();
        assert_eq!(prefixed.public_key(), from_hex.public_key());

        assert!(matches!(
            KeyPair::from_hex_seed("abcd"),
            Err(KeyError::InvalidSeed(_))
        ));
        assert!(matches!(
            KeyPair::from_hex_seed("not hex"),
            Err(KeyError::InvalidSeed(_))
        ));
    }
}
