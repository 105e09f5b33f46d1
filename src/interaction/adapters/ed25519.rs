//! Ed25519 detached-signature verification.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use crate::interaction::ports::SignatureVerifier;

/// Verifies Ed25519 signatures with `ed25519-dalek`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
        let Ok(key_bytes) = <&[u8; 32]>::try_from(public_key) else {
            return false;
        };
        let Ok(verifying_key) = VerifyingKey::from_bytes(key_bytes) else {
            return false;
        };
        let Ok(parsed) = Signature::from_slice(signature) else {
            return false;
        };
        verifying_key.verify(message, &parsed).is_ok()
    }
}
