//! Request authentication against the application's public key.

use tracing::debug;

use crate::interaction::adapters::Ed25519Verifier;
use crate::interaction::domain::AuthenticationHeaders;
use crate::interaction::ports::SignatureVerifier;

/// Checks that a request was signed by Discord.
///
/// The signed message is the timestamp followed by the raw body exactly as
/// received. Hex that fails to decode counts as an invalid signature.
#[must_use]
pub fn verify_signature<V>(
    verifier: &V,
    raw_body: &[u8],
    timestamp: &str,
    signature_hex: &str,
    public_key_hex: &str,
) -> bool
where
    V: SignatureVerifier + ?Sized,
{
    let (Ok(signature), Ok(public_key)) = (hex::decode(signature_hex), hex::decode(public_key_hex))
    else {
        debug!("signature or public key is not valid hex");
        return false;
    };
    let mut message = Vec::with_capacity(timestamp.len() + raw_body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(raw_body);
    verifier.verify(&message, &signature, &public_key)
}

/// Verifies requests for one application.
#[derive(Debug, Clone)]
pub struct AuthVerifier<V = Ed25519Verifier> {
    verifier: V,
    public_key_hex: String,
}

impl AuthVerifier<Ed25519Verifier> {
    /// Creates a verifier using Ed25519.
    #[must_use]
    pub fn ed25519(public_key_hex: impl Into<String>) -> Self {
        Self::new(Ed25519Verifier, public_key_hex)
    }
}

impl<V> AuthVerifier<V>
where
    V: SignatureVerifier,
{
    /// Creates a verifier with a custom signature primitive.
    #[must_use]
    pub fn new(verifier: V, public_key_hex: impl Into<String>) -> Self {
        Self {
            verifier,
            public_key_hex: public_key_hex.into(),
        }
    }

    /// Returns the hex-encoded public key.
    #[must_use]
    pub fn public_key_hex(&self) -> &str {
        &self.public_key_hex
    }

    /// Returns `true` when the request is authentic.
    #[must_use]
    pub fn verify(&self, raw_body: &[u8], headers: &AuthenticationHeaders) -> bool {
        verify_signature(
            &self.verifier,
            raw_body,
            headers.timestamp(),
            headers.signature(),
            &self.public_key_hex,
        )
    }
}
